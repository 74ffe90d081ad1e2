//! Headless versions of the site's in-page behavior: the application form
//! controller and the scroll animator.

pub mod dom;
pub mod form;
pub mod record;
pub mod scroll;
pub mod transport;

pub use dom::{ApplicationForm, BrowserLocation, FormView, Navigator};
pub use form::{FormController, UiState};
pub use record::{SubmissionRecord, SubmissionResult};
pub use scroll::ScrollAnimator;
pub use transport::{HttpTransport, Transport};
