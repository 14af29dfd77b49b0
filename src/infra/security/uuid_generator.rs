//! UUID v4 implementation of the id generator port.

use uuid::Uuid;

use crate::services::IdGenerator;

/// Random v4 UUID generator.
#[derive(Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> Uuid {
        Uuid::new_v4()
    }
}
