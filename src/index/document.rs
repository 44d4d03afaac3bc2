use crate::course::CourseRecord;
use crate::index::{Document, DocumentMetadata};
use sha2::{Digest, Sha256};

/// Separator between curriculum items in a document's content
const CURRICULUM_JOIN: &str = " \n ";

/// Stable document id for a course url
pub fn document_id(url: &str) -> String {
    hex::encode(Sha256::digest(url.as_bytes()))
}

/// Renders a course record as an indexable document
///
/// The content layout is what the prompt expects to find when documents are
/// stuffed into it, so the url is embedded in the text as well as kept in
/// the metadata.
pub fn to_document(record: &CourseRecord) -> Document {
    let content = format!(
        "Title: {} ; Web url: {} Description: {} ; Curriculum: {}",
        record.title,
        record.url,
        record.description,
        record.curriculum.join(CURRICULUM_JOIN)
    );

    Document {
        id: document_id(&record.url),
        content,
        metadata: DocumentMetadata {
            url: record.url.clone(),
        },
    }
}
