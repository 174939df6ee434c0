// Scripted `PetSource` for controller tests.
//
// Each call takes the next scripted reply off a queue. A reply is a
// oneshot receiver, so tests decide exactly when (and in which order)
// in-flight requests complete.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use adoptly_api::{AdoptionStatus, Error, Pet, PetId};
use tokio::sync::oneshot;

use crate::source::PetSource;

type Reply<T> = oneshot::Receiver<Result<T, Error>>;

#[derive(Default)]
pub(crate) struct ScriptedSource {
    lists: Mutex<VecDeque<Reply<Vec<Pet>>>>,
    pets: Mutex<VecDeque<Reply<Pet>>>,
    list_calls: AtomicUsize,
    requested_ids: Mutex<Vec<PetId>>,
}

impl ScriptedSource {
    /// Queue a list reply the test will release later.
    pub(crate) fn gate_list(&self) -> oneshot::Sender<Result<Vec<Pet>, Error>> {
        let (tx, rx) = oneshot::channel();
        self.lists.lock().expect("script lock").push_back(rx);
        tx
    }

    /// Queue a list reply that is ready immediately.
    pub(crate) fn reply_list(&self, reply: Result<Vec<Pet>, Error>) {
        let _ = self.gate_list().send(reply);
    }

    pub(crate) fn gate_pet(&self) -> oneshot::Sender<Result<Pet, Error>> {
        let (tx, rx) = oneshot::channel();
        self.pets.lock().expect("script lock").push_back(rx);
        tx
    }

    pub(crate) fn reply_pet(&self, reply: Result<Pet, Error>) {
        let _ = self.gate_pet().send(reply);
    }

    pub(crate) fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn requested_ids(&self) -> Vec<PetId> {
        self.requested_ids.lock().expect("script lock").clone()
    }
}

impl PetSource for ScriptedSource {
    async fn list_pets(&self) -> Result<Vec<Pet>, Error> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let reply = self
            .lists
            .lock()
            .expect("script lock")
            .pop_front()
            .expect("unscripted list_pets call");
        reply.await.expect("list reply dropped")
    }

    async fn get_pet(&self, id: &PetId) -> Result<Pet, Error> {
        self.requested_ids
            .lock()
            .expect("script lock")
            .push(id.clone());
        let reply = self
            .pets
            .lock()
            .expect("script lock")
            .pop_front()
            .expect("unscripted get_pet call");
        reply.await.expect("pet reply dropped")
    }
}

pub(crate) fn pet(id: u64, name: &str) -> Pet {
    Pet {
        id,
        name: name.to_owned(),
        kind: "Dog".to_owned(),
        image: format!("https://img.example/{id}.png"),
        adopted: AdoptionStatus::available(),
    }
}

pub(crate) fn server_error() -> Error {
    Error::Status {
        status: 500,
        body: "internal error".to_owned(),
    }
}

pub(crate) fn not_found(id: u64) -> Error {
    Error::NotFound {
        path: format!("/pets/{id}"),
    }
}
