use crate::errors::StreamError;

/// Push side of the observable paradigm: receives values followed by at most
/// one terminal notification.
pub trait Observer {
    type NextFnType;

    fn next(&mut self, _: Self::NextFnType);
    fn complete(&mut self);
    fn error(&mut self, _: StreamError);
}
