use crate::domain::{message::ChatMessage, session::Credential};

use super::contracts::ApiError;

const HISTORY_FAILED: &str = "Could not load chat history.";

pub trait HistorySource {
    fn chat_history(&self, credential: Option<&Credential>) -> Result<Vec<ChatMessage>, ApiError>;
}

impl<T> HistorySource for &T
where
    T: HistorySource + ?Sized,
{
    fn chat_history(&self, credential: Option<&Credential>) -> Result<Vec<ChatMessage>, ApiError> {
        (*self).chat_history(credential)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadHistoryError {
    Unauthorized,
    Rejected { status: u16 },
    TemporarilyUnavailable,
    DataContractViolation,
}

impl LoadHistoryError {
    pub fn user_message(&self) -> String {
        HISTORY_FAILED.to_owned()
    }
}

/// Fetches the full history for the credential's account, in server order.
pub fn load_history(
    source: &dyn HistorySource,
    credential: Option<&Credential>,
) -> Result<Vec<ChatMessage>, LoadHistoryError> {
    source.chat_history(credential).map_err(map_source_error)
}

fn map_source_error(error: ApiError) -> LoadHistoryError {
    match error {
        ApiError::Rejected { status: 401, .. } => LoadHistoryError::Unauthorized,
        ApiError::Rejected { status, .. } => LoadHistoryError::Rejected { status },
        ApiError::Transport => LoadHistoryError::TemporarilyUnavailable,
        ApiError::InvalidData => LoadHistoryError::DataContractViolation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubSource {
        result: Result<Vec<ChatMessage>, ApiError>,
        captured_token: std::sync::Mutex<Option<Option<String>>>,
    }

    impl StubSource {
        fn with_result(result: Result<Vec<ChatMessage>, ApiError>) -> Self {
            Self {
                result,
                captured_token: std::sync::Mutex::new(None),
            }
        }
    }

    impl HistorySource for StubSource {
        fn chat_history(
            &self,
            credential: Option<&Credential>,
        ) -> Result<Vec<ChatMessage>, ApiError> {
            *self.captured_token.lock().expect("token lock") =
                Some(credential.map(|c| c.as_str().to_owned()));
            self.result.clone()
        }
    }

    #[test]
    fn keeps_source_order_without_mutation() {
        let messages = vec![
            ChatMessage::user("what is my balance?"),
            ChatMessage::bot("Your balance is 12.50"),
        ];
        let source = StubSource::with_result(Ok(messages.clone()));

        let output = load_history(&source, None).expect("load should succeed");

        assert_eq!(output, messages);
    }

    #[test]
    fn passes_credential_to_source() {
        let source = StubSource::with_result(Ok(vec![]));
        let credential = Credential::parse("tok").expect("credential");

        let _ = load_history(&source, Some(&credential));

        assert_eq!(
            *source.captured_token.lock().expect("token lock"),
            Some(Some("tok".to_owned()))
        );
    }

    #[test]
    fn maps_source_errors() {
        let cases = [
            (
                ApiError::Rejected {
                    status: 401,
                    detail: None,
                },
                LoadHistoryError::Unauthorized,
            ),
            (
                ApiError::Rejected {
                    status: 500,
                    detail: Some("boom".to_owned()),
                },
                LoadHistoryError::Rejected { status: 500 },
            ),
            (ApiError::Transport, LoadHistoryError::TemporarilyUnavailable),
            (ApiError::InvalidData, LoadHistoryError::DataContractViolation),
        ];

        for (source_error, expected) in cases {
            let source = StubSource::with_result(Err(source_error));
            let err = load_history(&source, None).expect_err("must fail");
            assert_eq!(err, expected);
        }
    }
}
