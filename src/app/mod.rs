// Application layer - Use case interactors

pub mod container;
pub mod cut_interactor;
pub mod submit_interactor;

// Re-export interactors
pub use container::AppContainer;
pub use cut_interactor::CutInteractor;
pub use submit_interactor::{SubmitInteractor, SubmitRequest, Upload};
