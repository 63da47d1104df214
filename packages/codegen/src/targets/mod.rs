mod angular;
mod html;
mod react;
mod vue;

pub use angular::AngularEmitter;
pub use html::HtmlEmitter;
pub use react::ReactEmitter;
pub use vue::VueEmitter;
