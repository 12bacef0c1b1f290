//! Message API: request/response protocol, dispatch, and the native host.

mod dispatcher;
pub mod native;
mod protocol;

pub use dispatcher::Dispatcher;
pub use protocol::{
    BrowserEvent, MISSING_TAB_ID, MISSING_TAB_INFO, ProtocolError, Request, Response, Sender,
    SenderTab, TOGGLE_COMMAND, UNKNOWN_ACTION,
};
