//! Output formatting utilities

use std::io::IsTerminal;

use crate::cli::OutputFormat;

/// Determine the effective output format based on context
pub fn effective_format(format: OutputFormat, is_list: bool) -> OutputFormat {
    match format {
        OutputFormat::Auto => {
            if is_list && !std::io::stdout().is_terminal() {
                OutputFormat::Tsv
            } else {
                OutputFormat::Text
            }
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_format_is_kept() {
        assert_eq!(effective_format(OutputFormat::Json, true), OutputFormat::Json);
        assert_eq!(effective_format(OutputFormat::Tsv, false), OutputFormat::Tsv);
    }

    #[test]
    fn test_auto_single_item_is_text() {
        assert_eq!(effective_format(OutputFormat::Auto, false), OutputFormat::Text);
    }
}
