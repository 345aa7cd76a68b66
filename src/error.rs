//! Error types for mermaid-render

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error(
        "could not find the `{name}` executable (tried: {})\n\
         Install the Mermaid CLI with:\n  \
         npm install -g @mermaid-js/mermaid-cli\n\
         and make sure the global npm directory is on your PATH.",
        .tried.join(", ")
    )]
    ExecutableNotFound { name: String, tried: Vec<String> },

    #[error("renderer failed ({}): {command}", describe_code(.code))]
    RendererFailed { command: String, code: Option<i32> },

    #[error("failed to start renderer {}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RenderError {
    /// Exit status the wrapper should terminate with for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            RenderError::RendererFailed { code: Some(code), .. } => {
                u8::try_from(*code).ok().filter(|c| *c != 0).unwrap_or(1)
            }
            _ => 1,
        }
    }
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, RenderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_has_install_hint() {
        let err = RenderError::ExecutableNotFound {
            name: "mmdc".to_string(),
            tried: vec!["PATH".to_string(), "/home/u/.npm-global/bin/mmdc".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("`mmdc`"));
        assert!(msg.contains("npm install -g @mermaid-js/mermaid-cli"));
        assert!(msg.contains("PATH, /home/u/.npm-global/bin/mmdc"));
    }

    #[test]
    fn test_exit_code_mirrors_renderer() {
        let err = RenderError::RendererFailed { command: "mmdc".into(), code: Some(3) };
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("exit code 3"));
    }

    #[test]
    fn test_exit_code_falls_back_to_one() {
        let signalled = RenderError::RendererFailed { command: "mmdc".into(), code: None };
        assert_eq!(signalled.exit_code(), 1);

        let out_of_range = RenderError::RendererFailed { command: "mmdc".into(), code: Some(-1) };
        assert_eq!(out_of_range.exit_code(), 1);

        let missing = RenderError::ExecutableNotFound { name: "mmdc".into(), tried: vec![] };
        assert_eq!(missing.exit_code(), 1);
    }
}
