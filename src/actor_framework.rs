use std::collections::HashMap;
use std::hash::Hash;
use std::fmt::{Debug, Display};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::debug;

// =============================================================================
// 1. THE ABSTRACTION (Entity trait with lifecycle hooks)
// =============================================================================

/// Trait that any domain entity must implement to be managed by ResourceActor
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreateParams: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;

    /// Get the ID of the entity
    fn id(&self) -> &Self::Id;

    /// Construct the full Entity from the server-assigned ID and the create parameters
    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Result<Self, String>;

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), String> { Ok(()) }
    fn on_update(&mut self, patch: Self::Patch) -> Result<(), String>;
    fn on_delete(&self) -> Result<(), String> { Ok(()) }
}

/// Errors surfaced by the generic actor layer.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Rejected: {0}")]
    Rejected(String),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Immutable view of every entity in the store, newest first.
pub type Snapshot<T> = Arc<[T]>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        params: T::CreateParams,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    List {
        respond_to: Response<Snapshot<T>>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// Owns the store and publishes a fresh snapshot after every mutation.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    insertion_order: Vec<T::Id>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
    snapshots: watch::Sender<Snapshot<T>>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (snapshots, snapshot_rx) = watch::channel(Arc::<[T]>::from(Vec::new()));
        let actor = Self {
            receiver,
            store: HashMap::new(),
            insertion_order: Vec::new(),
            next_id_fn: Box::new(next_id_fn),
            snapshots,
        };
        let client = ResourceClient::new(sender, snapshot_rx);
        (actor, client)
    }

    pub async fn run(mut self) {
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    let _ = respond_to.send(self.handle_create(params));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    let _ = respond_to.send(self.handle_update(id, patch));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let _ = respond_to.send(self.handle_delete(id));
                }
                ResourceRequest::List { respond_to } => {
                    let _ = respond_to.send(Ok(self.snapshots.borrow().clone()));
                }
            }
        }
        debug!("Resource actor channel closed");
    }

    fn handle_create(&mut self, params: T::CreateParams) -> Result<T::Id, FrameworkError> {
        let id = (self.next_id_fn)();
        let mut item = T::from_create_params(id.clone(), params).map_err(FrameworkError::Rejected)?;
        item.on_create().map_err(FrameworkError::Rejected)?;
        self.store.insert(item.id().clone(), item);
        self.insertion_order.push(id.clone());
        self.publish();
        Ok(id)
    }

    fn handle_update(&mut self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError> {
        let item = self.store.get_mut(&id).ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        // Hooks mutate a copy so a rejected patch leaves the stored entity intact.
        let mut updated = item.clone();
        updated.on_update(patch).map_err(FrameworkError::Rejected)?;
        *item = updated.clone();
        self.publish();
        Ok(updated)
    }

    fn handle_delete(&mut self, id: T::Id) -> Result<(), FrameworkError> {
        let item = self.store.get(&id).ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        item.on_delete().map_err(FrameworkError::Rejected)?;
        self.store.remove(&id);
        self.insertion_order.retain(|existing| existing != &id);
        self.publish();
        Ok(())
    }

    fn publish(&self) {
        let snapshot: Vec<T> = self.insertion_order
            .iter()
            .rev()
            .filter_map(|id| self.store.get(id).cloned())
            .collect();
        debug!(entities = snapshot.len(), "Publishing snapshot");
        self.snapshots.send_replace(Arc::<[T]>::from(snapshot));
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
    snapshots: watch::Receiver<Snapshot<T>>,
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>, snapshots: watch::Receiver<Snapshot<T>>) -> Self {
        Self { sender, snapshots }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(build(respond_to))
            .await.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<T::Id, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to }).await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to }).await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update { id, patch, respond_to }).await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to }).await
    }

    pub async fn list(&self) -> Result<Snapshot<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { respond_to }).await
    }

    /// Subscribe to the snapshots published after every mutation.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot<T>> {
        self.snapshots.clone()
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        id: String,
        text: String,
        locked: bool,
    }

    #[derive(Debug)]
    struct NoteCreate {
        text: String,
    }

    #[derive(Debug)]
    struct NotePatch {
        text: String,
    }

    impl Entity for Note {
        type Id = String;
        type CreateParams = NoteCreate;
        type Patch = NotePatch;

        fn id(&self) -> &String { &self.id }

        fn from_create_params(id: String, params: NoteCreate) -> Result<Self, String> {
            if params.text.is_empty() {
                return Err("text must not be empty".to_string());
            }
            Ok(Self { id, text: params.text, locked: false })
        }

        fn on_update(&mut self, patch: NotePatch) -> Result<(), String> {
            self.text = patch.text;
            if self.text == "lock" {
                self.locked = true;
            }
            if self.text.is_empty() {
                return Err("text must not be empty".to_string());
            }
            Ok(())
        }

        fn on_delete(&self) -> Result<(), String> {
            if self.locked {
                Err("note is locked".to_string())
            } else {
                Ok(())
            }
        }
    }

    fn spawn_notes() -> ResourceClient<Note> {
        let counter = Arc::new(AtomicU64::new(1));
        let next_id = move || format!("note_{}", counter.fetch_add(1, Ordering::SeqCst));
        let (actor, client) = ResourceActor::new(10, next_id);
        tokio::spawn(actor.run());
        client
    }

    #[tokio::test]
    async fn test_crud_round_trip() {
        let client = spawn_notes();

        let id = client.create(NoteCreate { text: "first".into() }).await.unwrap();
        assert_eq!(id, "note_1");

        let note = client.get(id.clone()).await.unwrap().unwrap();
        assert_eq!(note.text, "first");

        let updated = client.update(id.clone(), NotePatch { text: "second".into() }).await.unwrap();
        assert_eq!(updated.text, "second");

        client.delete(id.clone()).await.unwrap();
        assert_eq!(client.get(id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_rejected_create_is_not_stored() {
        let client = spawn_notes();

        let result = client.create(NoteCreate { text: String::new() }).await;
        assert_eq!(result, Err(FrameworkError::Rejected("text must not be empty".into())));
        assert!(client.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_update_keeps_previous_state() {
        let client = spawn_notes();
        let id = client.create(NoteCreate { text: "keep".into() }).await.unwrap();

        let result = client.update(id.clone(), NotePatch { text: String::new() }).await;
        assert!(matches!(result, Err(FrameworkError::Rejected(_))));

        let note = client.get(id).await.unwrap().unwrap();
        assert_eq!(note.text, "keep");
    }

    #[tokio::test]
    async fn test_missing_items_report_not_found() {
        let client = spawn_notes();

        let update = client.update("nope".into(), NotePatch { text: "x".into() }).await;
        assert_eq!(update, Err(FrameworkError::NotFound("nope".into())));
        assert_eq!(client.delete("nope".into()).await, Err(FrameworkError::NotFound("nope".into())));
    }

    #[tokio::test]
    async fn test_delete_hook_can_veto() {
        let client = spawn_notes();
        let id = client.create(NoteCreate { text: "open".into() }).await.unwrap();
        client.update(id.clone(), NotePatch { text: "lock".into() }).await.unwrap();

        let result = client.delete(id.clone()).await;
        assert_eq!(result, Err(FrameworkError::Rejected("note is locked".into())));
        assert!(client.get(id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_snapshots_are_pushed_newest_first() {
        let client = spawn_notes();
        let mut snapshots = client.subscribe();
        assert!(snapshots.borrow_and_update().is_empty());

        client.create(NoteCreate { text: "a".into() }).await.unwrap();
        snapshots.changed().await.unwrap();
        assert_eq!(snapshots.borrow_and_update().len(), 1);

        let second = client.create(NoteCreate { text: "b".into() }).await.unwrap();
        snapshots.changed().await.unwrap();
        let texts: Vec<String> = snapshots.borrow_and_update().iter().map(|n| n.text.clone()).collect();
        assert_eq!(texts, vec!["b", "a"]);

        client.delete(second).await.unwrap();
        snapshots.changed().await.unwrap();
        let texts: Vec<String> = snapshots.borrow_and_update().iter().map(|n| n.text.clone()).collect();
        assert_eq!(texts, vec!["a"]);
    }

    #[tokio::test]
    async fn test_closed_actor_reports_error() {
        let (actor, client) = ResourceActor::<Note>::new(1, || "note".to_string());
        drop(actor);

        let result = client.get("note".into()).await;
        assert_eq!(result, Err(FrameworkError::ActorClosed));
    }
}
