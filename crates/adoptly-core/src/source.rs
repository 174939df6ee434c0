// ── Pet source seam ──
//
// The only dependency the controllers have. `PetClient` is the production
// implementation; anything else (fakes, caches) plugs in here.

use std::future::Future;
use std::sync::Arc;

use adoptly_api::{Error, Pet, PetClient, PetId};

/// Read access to the pet resource.
pub trait PetSource: Send + Sync {
    /// Fetch the full collection in server order.
    fn list_pets(&self) -> impl Future<Output = Result<Vec<Pet>, Error>> + Send;

    /// Fetch one pet by its opaque identifier.
    fn get_pet(&self, id: &PetId) -> impl Future<Output = Result<Pet, Error>> + Send;
}

impl PetSource for PetClient {
    fn list_pets(&self) -> impl Future<Output = Result<Vec<Pet>, Error>> + Send {
        PetClient::list_pets(self)
    }

    fn get_pet(&self, id: &PetId) -> impl Future<Output = Result<Pet, Error>> + Send {
        PetClient::get_pet(self, id)
    }
}

impl<T: PetSource> PetSource for Arc<T> {
    fn list_pets(&self) -> impl Future<Output = Result<Vec<Pet>, Error>> + Send {
        (**self).list_pets()
    }

    fn get_pet(&self, id: &PetId) -> impl Future<Output = Result<Pet, Error>> + Send {
        (**self).get_pet(id)
    }
}
