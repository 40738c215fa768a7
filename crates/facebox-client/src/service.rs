use crate::error::ServiceError;
use crate::types::{Face, ServiceInfo};

/// Operations the pipeline needs from a face recognition service.
///
/// The service is a black box: it learns labeled images, recognizes faces
/// in new ones, and can export or import its trained state as opaque bytes.
pub trait RecognitionService {
    /// Train the service on one image under the given identity.
    fn teach(&self, image: Vec<u8>, id: &str, name: &str) -> Result<(), ServiceError>;

    /// Detect faces in an image and match them against trained identities.
    fn check(&self, image: Vec<u8>) -> Result<Vec<Face>, ServiceError>;

    /// Export the trained state as an opaque blob.
    fn export_state(&self) -> Result<Vec<u8>, ServiceError>;

    /// Replace the service's state with a previously exported blob.
    fn import_state(&self, state: Vec<u8>) -> Result<(), ServiceError>;

    fn info(&self) -> Result<ServiceInfo, ServiceError>;
}

impl<T: RecognitionService + ?Sized> RecognitionService for &T {
    fn teach(&self, image: Vec<u8>, id: &str, name: &str) -> Result<(), ServiceError> {
        (**self).teach(image, id, name)
    }

    fn check(&self, image: Vec<u8>) -> Result<Vec<Face>, ServiceError> {
        (**self).check(image)
    }

    fn export_state(&self) -> Result<Vec<u8>, ServiceError> {
        (**self).export_state()
    }

    fn import_state(&self, state: Vec<u8>) -> Result<(), ServiceError> {
        (**self).import_state(state)
    }

    fn info(&self) -> Result<ServiceInfo, ServiceError> {
        (**self).info()
    }
}
