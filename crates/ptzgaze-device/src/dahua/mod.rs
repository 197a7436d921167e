//! Dahua IP cameras driven through their HTTP CGI interface.
//!
//! Every command is a single GET request. Commands answer with the plain text body `OK`,
//! queries with `key=value` lines.

mod cgi;
mod device;
mod transport;

pub use cgi::{
    check_ok, find_option, format_angle, parse_numeric_option, DahuaCgi, DahuaConfig, Focus,
    MotionAction,
};
pub use device::DahuaPtzDevice;
pub use transport::{CgiTransport, DryRunTransport};
