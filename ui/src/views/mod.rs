mod about;
pub use about::About;

mod contact;
pub use contact::{Contact, Footer};

mod experience;
pub use experience::Experience;

mod hero;
pub use hero::Hero;

mod portfolio;
pub use portfolio::Portfolio;

mod projects;
pub use projects::Projects;

mod skills;
pub use skills::Skills;
