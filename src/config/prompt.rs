use std::error::Error;
use std::fs;
use std::sync::Arc;
use log::info;

/// Built-in formatting and tone directives plus the fixed table of domain
/// figures. Opaque to the relay.
pub const DEFAULT_SYSTEM_INSTRUCTION: &str = include_str!("../../prompts/system_instruction.md");

/// Sent as the whole response when the provider fails before any text arrives.
pub const FALLBACK_RESPONSE: &str =
    "Based on Tony Seba's framework, technological disruptions follow predictable patterns.";

/// System instruction, either the built-in one or the contents of `path`.
pub fn load_system_instruction(path: Option<&str>) -> Result<Arc<str>, Box<dyn Error + Send + Sync>> {
    match path {
        Some(path) => {
            let content = fs
                ::read_to_string(path)
                .map_err(|e| format!("Failed to read system prompt file '{}': {}", path, e))?;
            if content.trim().is_empty() {
                return Err(format!("System prompt file '{}' is empty", path).into());
            }
            info!("Loaded system instruction from {} ({} bytes)", path, content.len());
            Ok(Arc::from(content))
        }
        None => Ok(Arc::from(DEFAULT_SYSTEM_INSTRUCTION)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_instruction_carries_data_table() {
        let instruction = load_system_instruction(None).unwrap();
        assert!(instruction.contains("KEY DATA POINTS TO USE"));
        assert!(instruction.contains("EVs projected to reach 95% of new vehicle sales by 2030"));
    }

    #[test]
    fn test_instruction_from_file() {
        let path = std::env::temp_dir().join(format!("system-instruction-{}.md", uuid::Uuid::new_v4()));
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "Answer in one sentence.").unwrap();

        let instruction = load_system_instruction(path.to_str()).unwrap();
        assert_eq!(&*instruction, "Answer in one sentence.\n");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_or_empty_file_is_error() {
        assert!(load_system_instruction(Some("/nonexistent/prompt.md")).is_err());

        let path = std::env::temp_dir().join(format!("system-instruction-{}.md", uuid::Uuid::new_v4()));
        fs::write(&path, "  \n").unwrap();
        assert!(load_system_instruction(path.to_str()).is_err());
        fs::remove_file(&path).unwrap();
    }
}
