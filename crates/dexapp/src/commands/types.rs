use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::KNOWN_TYPES;

/// Lists the selectable type tags, `all` first.
pub fn run() -> Result<CmdResult> {
    let types = KNOWN_TYPES.iter().map(|t| t.to_string()).collect();
    Ok(CmdResult::default().with_types(types))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_all_first() {
        let result = run().unwrap();
        assert_eq!(result.types.len(), 19);
        assert_eq!(result.types[0], "all");
        assert!(result.types.contains(&"fire".to_string()));
    }
}
