//! Control channel
//!
//! Request/response bridge between a control surface and the gain engine
//! living inside a page:
//!
//! ```text
//! ControlSurface --ControlRequest--> PageTransport --PageEnvelope--> PageContext
//!                <--ControlResponse--               <---oneshot-----
//! ```
//!
//! Every request travels with its own `oneshot` reply sender, so one request
//! gets one reply by construction.

pub mod knob;
mod page_context;
mod surface;
mod transport;

pub use page_context::{PageContext, PageEnvelope};
pub use surface::{ControlSurface, Preset};
pub use transport::{PageTransport, TabHost};
