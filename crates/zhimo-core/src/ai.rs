//! Request and response types for the AI document-processing endpoints.

use serde::{Deserialize, Serialize};

// =============================================================================
// VOCABULARIES
// =============================================================================

/// Output language for generated content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Zh,
    En,
}

impl std::str::FromStr for Language {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "zh" | "cn" | "chinese" => Ok(Self::Zh),
            "en" | "english" => Ok(Self::En),
            _ => Err(format!("Invalid language: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestructureStyle {
    #[default]
    Academic,
    Casual,
    Professional,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl std::str::FromStr for SummaryLength {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "short" => Ok(Self::Short),
            "medium" => Ok(Self::Medium),
            "long" => Ok(Self::Long),
            _ => Err(format!("Invalid summary length: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseType {
    MultipleChoice,
    TrueFalse,
    ShortAnswer,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MindmapStyle {
    #[default]
    Mindmap,
    Flowchart,
}

// =============================================================================
// RESTRUCTURE
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestructureRequest {
    pub style: RestructureStyle,
    pub language: Language,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestructureResponse {
    pub restructured_content: String,
    pub options: RestructureRequest,
}

// =============================================================================
// SUMMARY
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    pub length: SummaryLength,
    pub language: Language,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_key_points: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
    pub options: SummaryRequest,
}

// =============================================================================
// EXERCISES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExercisesRequest {
    pub count: u32,
    pub types: Vec<ExerciseType>,
    pub difficulty: Difficulty,
    pub language: Language,
}

impl Default for ExercisesRequest {
    fn default() -> Self {
        Self {
            count: 5,
            types: vec![ExerciseType::MultipleChoice, ExerciseType::ShortAnswer],
            difficulty: Difficulty::default(),
            language: Language::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    #[serde(rename = "type")]
    pub exercise_type: ExerciseType,
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub correct_answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExercisesResponse {
    pub exercises: Vec<Exercise>,
    pub options: ExercisesRequest,
}

// =============================================================================
// CONCEPTS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptsRequest {
    pub max_concepts: u32,
    pub language: Language,
}

impl Default for ConceptsRequest {
    fn default() -> Self {
        Self {
            max_concepts: 10,
            language: Language::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concept {
    pub term: String,
    pub definition: String,
    pub importance: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptsResponse {
    pub concepts: Vec<Concept>,
    pub options: ConceptsRequest,
}

// =============================================================================
// MIND MAP
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindmapRequest {
    pub max_nodes: u32,
    pub language: Language,
    pub style: MindmapStyle,
}

impl Default for MindmapRequest {
    fn default() -> Self {
        Self {
            max_nodes: 20,
            language: Language::default(),
            style: MindmapStyle::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindmapResponse {
    /// Mermaid markup.
    pub mind_map: String,
    pub is_valid_syntax: bool,
    pub options: MindmapRequest,
}

// =============================================================================
// BATCH
// =============================================================================

/// Runs several AI operations in one request; unset flags are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchProcessRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_restructure: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_summary: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_exercises: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_concepts: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_mind_map: Option<bool>,
    pub language: Language,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchProcessResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restructure: Option<RestructureResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<SummaryResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercises: Option<ExercisesResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concepts: Option<ConceptsResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mind_map: Option<MindmapResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_request_wire_shape() {
        let request = SummaryRequest {
            length: SummaryLength::Short,
            language: Language::En,
            include_key_points: Some(true),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"length": "short", "language": "en", "includeKeyPoints": true})
        );
    }

    #[test]
    fn test_exercise_types_are_snake_case() {
        let request = ExercisesRequest::default();
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["types"], json!(["multiple_choice", "short_answer"]));
        assert_eq!(value["difficulty"], "medium");
    }

    #[test]
    fn test_exercise_from_backend() {
        let exercise: Exercise = serde_json::from_value(json!({
            "type": "true_false",
            "question": "Opportunity cost is what you give up.",
            "correctAnswer": "true",
            "difficulty": "easy"
        }))
        .unwrap();
        assert_eq!(exercise.exercise_type, ExerciseType::TrueFalse);
        assert!(exercise.options.is_none());
    }

    #[test]
    fn test_batch_request_omits_unset_flags() {
        let request = BatchProcessRequest {
            include_summary: Some(true),
            include_mind_map: Some(true),
            language: Language::Zh,
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"includeSummary": true, "includeMindMap": true, "language": "zh"})
        );
    }

    #[test]
    fn test_mindmap_response_from_backend() {
        let response: MindmapResponse = serde_json::from_value(json!({
            "mindMap": "mindmap\n  root((Economics))",
            "isValidSyntax": true,
            "options": {"maxNodes": 15, "language": "zh", "style": "flowchart"}
        }))
        .unwrap();
        assert!(response.is_valid_syntax);
        assert_eq!(response.options.style, MindmapStyle::Flowchart);
    }

    #[test]
    fn test_language_parse() {
        assert_eq!("EN".parse::<Language>().unwrap(), Language::En);
        assert!("fr".parse::<Language>().is_err());
    }
}
