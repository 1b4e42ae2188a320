//! # Branch Results and Short-Circuiting
//!
//! Every branch of a routing tree returns a [`RouteResult`]. `Ok(())` means
//! the branch did not dispatch and the parent should continue with the next
//! sibling. `Err(Halt)` stops evaluation of the whole tree: either a target
//! was dispatched and the response is finished, or dispatch failed fatally.
//!
//! Because the halt travels through `Err`, `?` is all a branch body needs to
//! guarantee that no sibling or ancestor runs after a successful dispatch.

use crate::{
    error::{ConfigurationError, DispatchError, RegistryError},
    response::Response,
};

/// Result of evaluating a route branch.
pub type RouteResult = Result<(), Halt>;

/// Stops evaluation of the routing tree.
#[derive(Debug)]
pub enum Halt {
    /// A target was dispatched; this is the finished response.
    Finished(Response),
    /// Dispatch failed; the request ends with a server error.
    Failed(DispatchError),
}

impl Halt {
    /// Returns `true` if a response was finished.
    pub fn is_finished(&self) -> bool {
        matches!(self, Halt::Finished(_))
    }

    /// The finished response, if any.
    pub fn response(&self) -> Option<&Response> {
        match self {
            Halt::Finished(response) => Some(response),
            Halt::Failed(_) => None,
        }
    }

    /// The dispatch error, if any.
    pub fn error(&self) -> Option<&DispatchError> {
        match self {
            Halt::Finished(_) => None,
            Halt::Failed(err) => Some(err),
        }
    }
}

impl From<DispatchError> for Halt {
    fn from(err: DispatchError) -> Self {
        Halt::Failed(err)
    }
}

impl From<ConfigurationError> for Halt {
    fn from(err: ConfigurationError) -> Self {
        Halt::Failed(err.into())
    }
}

impl From<RegistryError> for Halt {
    fn from(err: RegistryError) -> Self {
        Halt::Failed(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::Status;

    fn branch(dispatch: bool) -> RouteResult {
        if dispatch {
            Err(Halt::Finished(Response::empty(Status::OK)))
        } else {
            Ok(())
        }
    }

    #[test]
    fn test_question_mark_short_circuits() {
        let mut ran = Vec::new();
        let mut tree = || -> RouteResult {
            ran.push(1);
            branch(false)?;
            ran.push(2);
            branch(true)?;
            ran.push(3);
            Ok(())
        };
        let halt = tree().unwrap_err();
        assert!(halt.is_finished());
        assert_eq!(ran, vec![1, 2]);
    }

    #[test]
    fn test_halt_from_errors() {
        let halt: Halt = ConfigurationError::MissingTarget.into();
        assert!(matches!(
            halt.error(),
            Some(DispatchError::Configuration(ConfigurationError::MissingTarget))
        ));
        assert!(halt.response().is_none());
    }
}
