//! Prompt template for course search answers

/// A chat prompt split into system instructions and human turns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: Vec<String>,
    pub human: Vec<String>,
}

const SYSTEM_INSTRUCTIONS: [&str; 3] = [
    "You are a search engine for finding free courses from Analytics Vidya. Course details will be provided to you",
    "You will be provided with course title, course link, description and curriculum. Show the curriculum in a bullet points format",
    "Handle the details wisely and give the output in a proper format. Respond only with the course details in a tabular or descriptive markdown format as it suites",
];

/// Separator placed between retrieved documents
pub const DOCUMENT_SEPARATOR: &str = "\n\n";

/// Builds the course search prompt
///
/// The retrieved documents are stuffed into a single human turn, joined by
/// [`DOCUMENT_SEPARATOR`].
pub fn course_search_prompt(keyword: &str, documents: &[String]) -> Prompt {
    let details = documents.join(DOCUMENT_SEPARATOR);

    Prompt {
        system: SYSTEM_INSTRUCTIONS.iter().map(|s| s.to_string()).collect(),
        human: vec![
            format!("Give me some detail related to this keyword : {}", keyword),
            format!("These are the details of courses : {}", details),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_includes_keyword_and_documents() {
        let documents = vec![
            "Title: Python ; Web url: https://site.test/p".to_string(),
            "Title: SQL ; Web url: https://site.test/s".to_string(),
        ];
        let prompt = course_search_prompt("python", &documents);

        assert_eq!(prompt.system.len(), 3);
        assert_eq!(prompt.human.len(), 2);
        assert_eq!(
            prompt.human[0],
            "Give me some detail related to this keyword : python"
        );
        assert!(prompt.human[1].ends_with(
            "Title: Python ; Web url: https://site.test/p\n\nTitle: SQL ; Web url: https://site.test/s"
        ));
    }

    #[test]
    fn test_prompt_with_no_documents() {
        let prompt = course_search_prompt("rust", &[]);
        assert_eq!(prompt.human[1], "These are the details of courses : ");
    }

    #[test]
    fn test_system_asks_for_bulleted_curriculum() {
        let prompt = course_search_prompt("x", &[]);
        assert!(prompt.system[1].contains("bullet points"));
    }
}
