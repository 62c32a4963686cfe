//! Data transfer objects for the Web API.

mod request;
mod response;
mod validation;

pub use request::{ResolveQuery, SetExpiryRequest, UploadRequest};
pub use response::{
    FileResponse, MessageResponse, ShareResponse, StorageResponse, UploadResponse,
};
pub use validation::ValidatedJson;
