use crate::utils::error::Result;
use tokio::io::AsyncReadExt;

/// Where the text to convert comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(String),
    Stdin,
}

impl InputSource {
    pub fn from_arg(path: Option<&str>) -> Self {
        match path {
            Some(path) => InputSource::File(path.to_string()),
            None => InputSource::Stdin,
        }
    }

    pub async fn read_to_string(&self) -> Result<String> {
        match self {
            InputSource::File(path) => {
                tracing::debug!("Reading input from {}", path);
                Ok(tokio::fs::read_to_string(path).await?)
            }
            InputSource::Stdin => {
                tracing::debug!("Reading input from stdin");
                let mut text = String::new();
                tokio::io::stdin().read_to_string(&mut text).await?;
                Ok(text)
            }
        }
    }
}
