//! Roster client: keeps the local roster in step with the directory service

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use super::confirm::Confirm;
use super::sequencer::{Sequencer, Ticket, Watermark};
use crate::domain::roster::{
    RosterSnapshot, RosterState, StatusMessage, CREATE_ERROR, CREATE_SUCCESS, DELETE_ERROR,
    DELETE_PROMPT, DELETE_SUCCESS, FETCH_ERROR, SUBMIT_BUSY,
};
use crate::domain::{FormField, FormState, UserDirectory, UserId};

/// What happened to a requested operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The request went out and the service accepted it
    Succeeded,
    /// The request went out and failed; the message says why
    Failed,
    /// The operator declined the confirmation; nothing was sent
    Declined,
    /// Nothing was sent (already in flight, incomplete form, already
    /// mounted) or the result arrived after a newer one and was dropped
    Skipped,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

#[derive(Debug, Default)]
struct ClientState {
    roster: RosterState,
    form: FormState,
    mounted: bool,
    applied_fetch: Watermark,
    shown_message: Watermark,
    pending_deletes: HashSet<UserId>,
}

impl ClientState {
    /// Replace the message unless an operation started later already wrote one
    fn show(&mut self, ticket: Ticket, message: Option<StatusMessage>) -> bool {
        if !self.shown_message.admit(ticket) {
            debug!("Dropping message from an operation superseded by a newer one");
            return false;
        }
        self.roster.set_message(message);
        true
    }
}

/// Owns the roster, the creation form and the status message
///
/// Cloning is cheap and clones share state, so one client can serve
/// several concurrent callers. Results are applied in start order: a list
/// response older than the one on screen is dropped, and so is a message
/// from an operation that started before the one currently shown.
pub struct RosterClient<D: ?Sized = dyn UserDirectory> {
    directory: Arc<D>,
    state: Arc<RwLock<ClientState>>,
    sequencer: Arc<Sequencer>,
}

impl<D: ?Sized> Clone for RosterClient<D> {
    fn clone(&self) -> Self {
        Self {
            directory: Arc::clone(&self.directory),
            state: Arc::clone(&self.state),
            sequencer: Arc::clone(&self.sequencer),
        }
    }
}

impl<D: UserDirectory + ?Sized> RosterClient<D> {
    pub fn new(directory: Arc<D>) -> Self {
        Self {
            directory,
            state: Arc::new(RwLock::new(ClientState::default())),
            sequencer: Arc::new(Sequencer::new()),
        }
    }

    /// First load of the roster; later calls do nothing
    pub async fn mount(&self) -> Outcome {
        {
            let mut state = self.state.write().await;
            if state.mounted {
                return Outcome::Skipped;
            }
            state.mounted = true;
        }

        self.list_users().await
    }

    /// Replace the roster with the service's current collection
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Outcome {
        let ticket = self.sequencer.issue();
        let result = self.directory.list().await;

        let mut state = self.state.write().await;
        match result {
            Ok(users) => {
                if !state.applied_fetch.admit(ticket) {
                    debug!("Discarding user list older than the one already shown");
                    return Outcome::Skipped;
                }
                debug!(count = users.len(), "Fetched users");
                state.roster.replace_users(users);
                Outcome::Succeeded
            }
            Err(e) => {
                warn!(error = %e, "Error fetching users");
                state.show(ticket, Some(StatusMessage::error(FETCH_ERROR)));
                Outcome::Failed
            }
        }
    }

    /// Update one field of the creation form
    pub async fn edit_field(&self, field: FormField, value: impl Into<String>) {
        self.state.write().await.form.set(field, value);
    }

    /// Submit the creation form
    ///
    /// Ignored while another submission is in flight or while a field holds
    /// a value its input would refuse. On success the form is cleared and
    /// the roster refetched; on failure the form is left as typed.
    pub async fn submit(&self) -> Outcome {
        self.submit_with(None).await
    }

    /// Replace the whole form with `form` and submit it
    ///
    /// The replacement and the in-flight check happen under one lock, so a
    /// form posted while another submission is running leaves the running
    /// submission's form alone. That case is `Skipped` and says so in the
    /// message; the running submission still reports its own result.
    pub async fn submit_form(&self, form: FormState) -> Outcome {
        self.submit_with(Some(form)).await
    }

    #[instrument(skip(self, posted))]
    async fn submit_with(&self, posted: Option<FormState>) -> Outcome {
        let ticket = self.sequencer.issue();

        let payload = {
            let mut state = self.state.write().await;

            if state.roster.loading() {
                debug!("Submission already in flight");
                if posted.is_some() {
                    state
                        .roster
                        .set_message(Some(StatusMessage::error(SUBMIT_BUSY)));
                }
                return Outcome::Skipped;
            }

            if let Some(form) = posted {
                state.form = form;
            }

            if let Some((field, e)) = state.form.first_invalid() {
                debug!(field = %field, error = %e, "Form not ready for submission");
                return Outcome::Skipped;
            }

            state.show(ticket, None);
            state.roster.set_loading(true);
            state.form.to_new_user()
        };

        let username = payload.username.clone();
        let result = self.directory.create(payload).await;

        let outcome = {
            let mut state = self.state.write().await;
            state.roster.set_loading(false);

            match result {
                Ok(()) => {
                    info!(username = %username, "User added");
                    state.show(ticket, Some(StatusMessage::success(CREATE_SUCCESS)));
                    state.form.reset();
                    Outcome::Succeeded
                }
                Err(e) => {
                    warn!(username = %username, error = %e, "Error adding user");
                    let text = e.service_message().unwrap_or(CREATE_ERROR).to_string();
                    state.show(ticket, Some(StatusMessage::error(text)));
                    Outcome::Failed
                }
            }
        };

        if outcome.is_success() {
            self.list_users().await;
        }

        outcome
    }

    /// Delete a user after the operator confirms
    ///
    /// The row stays in the roster until the follow-up fetch no longer
    /// returns it. A second delete of the same id while the first is in
    /// flight sends nothing.
    #[instrument(skip(self, id, confirm), fields(user_id = %id))]
    pub async fn delete_user<C>(&self, id: &UserId, confirm: &C) -> Outcome
    where
        C: Confirm + ?Sized,
    {
        if !confirm.confirm(DELETE_PROMPT).await {
            debug!("Delete declined");
            return Outcome::Declined;
        }

        let ticket = self.sequencer.issue();

        if !self.state.write().await.pending_deletes.insert(id.clone()) {
            debug!("Delete already in flight");
            return Outcome::Skipped;
        }

        let result = self.directory.delete(id).await;

        let outcome = {
            let mut state = self.state.write().await;
            state.pending_deletes.remove(id);

            match result {
                Ok(()) => {
                    info!("User deleted");
                    state.show(ticket, Some(StatusMessage::success(DELETE_SUCCESS)));
                    Outcome::Succeeded
                }
                Err(e) => {
                    warn!(error = %e, "Error deleting user");
                    state.show(ticket, Some(StatusMessage::error(DELETE_ERROR)));
                    Outcome::Failed
                }
            }
        };

        if outcome.is_success() {
            self.list_users().await;
        }

        outcome
    }

    pub async fn is_delete_pending(&self, id: &UserId) -> bool {
        self.state.read().await.pending_deletes.contains(id)
    }

    pub async fn roster(&self) -> RosterState {
        self.state.read().await.roster.clone()
    }

    pub async fn form(&self) -> FormState {
        self.state.read().await.form.clone()
    }

    /// Roster and form read under one lock
    pub async fn snapshot(&self) -> RosterSnapshot {
        let state = self.state.read().await;
        RosterSnapshot {
            roster: state.roster.clone(),
            form: state.form.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::MockUserDirectory;
    use crate::domain::{DomainError, NewUser, User};
    use crate::infrastructure::directory::InMemoryUserDirectory;
    use crate::infrastructure::roster::Answered;

    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use tokio::sync::oneshot;

    fn user(id: &str, name: &str) -> User {
        User::new(
            UserId::new(id).unwrap(),
            name,
            format!("{}@x.com", name),
            "1990-01-05",
        )
    }

    async fn fill_form<D: UserDirectory + ?Sized>(client: &RosterClient<D>) {
        client.edit_field(FormField::Username, "ana").await;
        client.edit_field(FormField::Email, "ana@x.com").await;
        client.edit_field(FormField::DateOfBirth, "1990-01-05").await;
    }

    #[tokio::test]
    async fn test_mount_lists_once() {
        let mut mock = MockUserDirectory::new();
        mock.expect_list()
            .times(1)
            .returning(|| Ok(vec![user("1", "ana"), user("2", "bo")]));

        let client = RosterClient::new(Arc::new(mock));

        assert_eq!(client.mount().await, Outcome::Succeeded);
        assert_eq!(client.mount().await, Outcome::Skipped);

        let roster = client.roster().await;
        assert_eq!(roster.users().len(), 2);
        assert_eq!(roster.users()[0].username(), "ana");
        assert_eq!(roster.message_text(), "");
    }

    #[tokio::test]
    async fn test_list_failure_keeps_users() {
        let dir = Arc::new(InMemoryUserDirectory::with_users(vec![user("1", "ana")]));
        let client = RosterClient::new(Arc::clone(&dir));
        client.mount().await;

        dir.set_should_fail(true).await;
        assert_eq!(client.list_users().await, Outcome::Failed);

        let roster = client.roster().await;
        assert_eq!(roster.users().len(), 1);
        assert_eq!(roster.message_text(), "Error fetching users");
        assert!(roster.message().unwrap().is_error());
    }

    #[tokio::test]
    async fn test_list_twice_is_stable() {
        let dir = Arc::new(InMemoryUserDirectory::with_users(vec![
            user("2", "bo"),
            user("1", "ana"),
        ]));
        let client = RosterClient::new(dir);

        client.list_users().await;
        let first = client.roster().await.users().to_vec();
        client.list_users().await;
        let second = client.roster().await.users().to_vec();

        assert_eq!(first, second);
        assert_eq!(second[0].username(), "bo");
    }

    #[tokio::test]
    async fn test_submit_success() {
        let mut mock = MockUserDirectory::new();
        mock.expect_create()
            .withf(|u: &NewUser| {
                u.username == "ana" && u.email == "ana@x.com" && u.date_of_birth == "1990-01-05"
            })
            .times(1)
            .returning(|_| Ok(()));
        mock.expect_list()
            .times(1)
            .returning(|| Ok(vec![user("1", "ana")]));

        let client = RosterClient::new(Arc::new(mock));
        fill_form(&client).await;

        assert_eq!(client.submit().await, Outcome::Succeeded);

        let snapshot = client.snapshot().await;
        assert_eq!(snapshot.roster.message_text(), "User added successfully!");
        assert!(!snapshot.roster.message().unwrap().is_error());
        assert!(!snapshot.roster.loading());
        assert_eq!(snapshot.form, FormState::default());
        assert_eq!(snapshot.roster.users().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_rejected_with_service_message() {
        let mut mock = MockUserDirectory::new();
        mock.expect_create()
            .times(1)
            .returning(|_| Err(DomainError::rejected(409, Some("duplicate email".into()))));
        mock.expect_list().times(0);

        let client = RosterClient::new(Arc::new(mock));
        fill_form(&client).await;
        let before = client.form().await;

        assert_eq!(client.submit().await, Outcome::Failed);

        let snapshot = client.snapshot().await;
        assert_eq!(snapshot.roster.message_text(), "duplicate email");
        assert!(snapshot.roster.message().unwrap().is_error());
        assert!(!snapshot.roster.loading());
        assert_eq!(snapshot.form, before);
    }

    #[tokio::test]
    async fn test_submit_failure_generic_message() {
        let mut mock = MockUserDirectory::new();
        mock.expect_create()
            .times(1)
            .returning(|_| Err(DomainError::request("Connection failed")));

        let client = RosterClient::new(Arc::new(mock));
        fill_form(&client).await;

        assert_eq!(client.submit().await, Outcome::Failed);
        assert_eq!(client.roster().await.message_text(), "Error adding user");
        assert!(!client.roster().await.loading());
    }

    #[tokio::test]
    async fn test_submit_incomplete_form_sends_nothing() {
        let mut mock = MockUserDirectory::new();
        mock.expect_create().times(0);

        let client = RosterClient::new(Arc::new(mock));
        client.edit_field(FormField::Username, "ana").await;

        assert_eq!(client.submit().await, Outcome::Skipped);
        assert_eq!(client.form().await.username, "ana");
    }

    #[tokio::test]
    async fn test_submit_clears_previous_message() {
        let dir = Arc::new(InMemoryUserDirectory::new());
        let client = RosterClient::new(Arc::clone(&dir));

        dir.set_should_fail(true).await;
        client.list_users().await;
        assert_eq!(client.roster().await.message_text(), "Error fetching users");

        dir.set_should_fail(false).await;
        fill_form(&client).await;
        client.submit().await;

        assert_eq!(
            client.roster().await.message_text(),
            "User added successfully!"
        );
    }

    #[tokio::test]
    async fn test_delete_declined_sends_nothing() {
        let mut mock = MockUserDirectory::new();
        mock.expect_list()
            .times(1)
            .returning(|| Ok(vec![user("1", "ana")]));
        mock.expect_delete().times(0);

        let client = RosterClient::new(Arc::new(mock));
        client.mount().await;
        let before = client.roster().await;

        let id = UserId::new("1").unwrap();
        assert_eq!(client.delete_user(&id, &Answered(false)).await, Outcome::Declined);
        assert_eq!(client.roster().await, before);
    }

    #[tokio::test]
    async fn test_delete_confirmed_refetches() {
        let dir = Arc::new(InMemoryUserDirectory::with_users(vec![
            user("1", "ana"),
            user("2", "bo"),
        ]));
        let client = RosterClient::new(dir);
        client.mount().await;

        let id = UserId::new("1").unwrap();
        assert_eq!(client.delete_user(&id, &Answered(true)).await, Outcome::Succeeded);

        let roster = client.roster().await;
        assert_eq!(roster.message_text(), "User deleted successfully!");
        assert!(roster.find(&id).is_none());
        assert_eq!(roster.users().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_failure() {
        let mut mock = MockUserDirectory::new();
        mock.expect_list()
            .times(1)
            .returning(|| Ok(vec![user("1", "ana")]));
        mock.expect_delete()
            .withf(|id: &UserId| id.as_str() == "1")
            .times(1)
            .returning(|_| Err(DomainError::rejected(500, None)));

        let client = RosterClient::new(Arc::new(mock));
        client.mount().await;

        let id = UserId::new("1").unwrap();
        assert_eq!(client.delete_user(&id, &Answered(true)).await, Outcome::Failed);

        let roster = client.roster().await;
        assert_eq!(roster.message_text(), "Error deleting user");
        assert_eq!(roster.users().len(), 1);
        assert!(!client.is_delete_pending(&id).await);
    }

    #[tokio::test]
    async fn test_concurrent_deletes_of_different_users() {
        let dir = Arc::new(InMemoryUserDirectory::with_users(vec![
            user("1", "ana"),
            user("2", "bo"),
            user("3", "cy"),
        ]));
        let client = RosterClient::new(Arc::clone(&dir));
        client.mount().await;

        let first = UserId::new("1").unwrap();
        let second = UserId::new("2").unwrap();
        let (a, b) = futures::future::join(
            client.delete_user(&first, &Answered(true)),
            client.delete_user(&second, &Answered(true)),
        )
        .await;

        assert_eq!(a, Outcome::Succeeded);
        assert_eq!(b, Outcome::Succeeded);
        assert_eq!(dir.len().await, 1);

        let roster = client.roster().await;
        assert_eq!(roster.users().len(), 1);
        assert_eq!(roster.users()[0].username(), "cy");
    }

    #[tokio::test]
    async fn test_submit_form_replaces_fields() {
        let dir = Arc::new(InMemoryUserDirectory::new());
        let client = RosterClient::new(Arc::clone(&dir));
        client.edit_field(FormField::Username, "stale").await;

        let posted = FormState {
            username: "ana".to_string(),
            email: "ana@x.com".to_string(),
            date_of_birth: "1990-01-05".to_string(),
        };

        assert_eq!(client.submit_form(posted).await, Outcome::Succeeded);
        assert_eq!(dir.len().await, 1);
        assert_eq!(client.roster().await.users()[0].username(), "ana");
        assert_eq!(client.form().await, FormState::default());
    }

    #[tokio::test]
    async fn test_submit_timeout_reports_create_error() {
        use std::time::Duration;

        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        use crate::infrastructure::HttpUserDirectory;

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/users"))
            .respond_with(ResponseTemplate::new(201).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let directory = HttpUserDirectory::new(
            &format!("{}/api/users", server.uri()),
            Duration::from_millis(200),
        )
        .unwrap();
        let client = RosterClient::new(Arc::new(directory));
        fill_form(&client).await;

        assert_eq!(client.submit().await, Outcome::Failed);

        let snapshot = client.snapshot().await;
        assert!(!snapshot.roster.loading());
        assert_eq!(snapshot.roster.message_text(), "Error adding user");
        assert_eq!(snapshot.form.username, "ana");
    }

    /// Directory whose calls block until the test releases them
    #[derive(Default)]
    struct GatedDirectory {
        users: Vec<User>,
        list_gates: Mutex<VecDeque<oneshot::Receiver<Vec<User>>>>,
        create_gates: Mutex<VecDeque<oneshot::Receiver<Result<(), DomainError>>>>,
        delete_gates: Mutex<VecDeque<oneshot::Receiver<Result<(), DomainError>>>>,
        list_calls: AtomicUsize,
        create_calls: AtomicUsize,
        delete_calls: AtomicUsize,
    }

    impl GatedDirectory {
        fn gate_list(&self) -> oneshot::Sender<Vec<User>> {
            let (tx, rx) = oneshot::channel();
            self.list_gates.lock().unwrap().push_back(rx);
            tx
        }

        fn gate_create(&self) -> oneshot::Sender<Result<(), DomainError>> {
            let (tx, rx) = oneshot::channel();
            self.create_gates.lock().unwrap().push_back(rx);
            tx
        }

        fn gate_delete(&self) -> oneshot::Sender<Result<(), DomainError>> {
            let (tx, rx) = oneshot::channel();
            self.delete_gates.lock().unwrap().push_back(rx);
            tx
        }
    }

    #[async_trait]
    impl UserDirectory for GatedDirectory {
        async fn list(&self) -> Result<Vec<User>, DomainError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            let gate = self.list_gates.lock().unwrap().pop_front();
            match gate {
                Some(rx) => Ok(rx.await.unwrap()),
                None => Ok(self.users.clone()),
            }
        }

        async fn create(&self, _user: NewUser) -> Result<(), DomainError> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            let gate = self.create_gates.lock().unwrap().pop_front();
            match gate {
                Some(rx) => rx.await.unwrap(),
                None => Ok(()),
            }
        }

        async fn delete(&self, _id: &UserId) -> Result<(), DomainError> {
            self.delete_calls.fetch_add(1, Ordering::SeqCst);
            let gate = self.delete_gates.lock().unwrap().pop_front();
            match gate {
                Some(rx) => rx.await.unwrap(),
                None => Ok(()),
            }
        }
    }

    async fn wait_for(counter: &AtomicUsize, calls: usize) {
        while counter.load(Ordering::SeqCst) < calls {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_stale_list_is_discarded() {
        let dir = Arc::new(GatedDirectory::default());
        let older = dir.gate_list();
        let newer = dir.gate_list();
        let client = RosterClient::new(Arc::clone(&dir));

        let first = tokio::spawn({
            let client = client.clone();
            async move { client.list_users().await }
        });
        wait_for(&dir.list_calls, 1).await;

        let second = tokio::spawn({
            let client = client.clone();
            async move { client.list_users().await }
        });
        wait_for(&dir.list_calls, 2).await;

        newer.send(vec![user("2", "bo")]).unwrap();
        assert_eq!(second.await.unwrap(), Outcome::Succeeded);

        older.send(vec![user("1", "ana"), user("2", "bo")]).unwrap();
        assert_eq!(first.await.unwrap(), Outcome::Skipped);

        let roster = client.roster().await;
        assert_eq!(roster.users().len(), 1);
        assert_eq!(roster.users()[0].username(), "bo");
    }

    #[tokio::test]
    async fn test_submit_while_loading_is_ignored() {
        let dir = Arc::new(GatedDirectory::default());
        let release = dir.gate_create();
        let client = RosterClient::new(Arc::clone(&dir));
        fill_form(&client).await;

        let pending = tokio::spawn({
            let client = client.clone();
            async move { client.submit().await }
        });
        wait_for(&dir.create_calls, 1).await;
        assert!(client.roster().await.loading());

        assert_eq!(client.submit().await, Outcome::Skipped);
        assert_eq!(dir.create_calls.load(Ordering::SeqCst), 1);

        release.send(Ok(())).unwrap();
        assert_eq!(pending.await.unwrap(), Outcome::Succeeded);
        assert!(!client.roster().await.loading());
    }

    #[tokio::test]
    async fn test_duplicate_delete_is_ignored() {
        let dir = Arc::new(GatedDirectory::default());
        let release = dir.gate_delete();
        let client = RosterClient::new(Arc::clone(&dir));
        let id = UserId::new("1").unwrap();

        let pending = tokio::spawn({
            let client = client.clone();
            let id = id.clone();
            async move { client.delete_user(&id, &Answered(true)).await }
        });
        wait_for(&dir.delete_calls, 1).await;
        assert!(client.is_delete_pending(&id).await);

        assert_eq!(client.delete_user(&id, &Answered(true)).await, Outcome::Skipped);
        assert_eq!(dir.delete_calls.load(Ordering::SeqCst), 1);

        release.send(Ok(())).unwrap();
        assert_eq!(pending.await.unwrap(), Outcome::Succeeded);
        assert!(!client.is_delete_pending(&id).await);
    }

    #[tokio::test]
    async fn test_older_operation_does_not_overwrite_message() {
        let dir = Arc::new(GatedDirectory::default());
        let create_gate = dir.gate_create();
        let delete_gate = dir.gate_delete();
        let client = RosterClient::new(Arc::clone(&dir));
        fill_form(&client).await;

        let create = tokio::spawn({
            let client = client.clone();
            async move { client.submit().await }
        });
        wait_for(&dir.create_calls, 1).await;

        let delete = tokio::spawn({
            let client = client.clone();
            async move {
                client
                    .delete_user(&UserId::new("1").unwrap(), &Answered(true))
                    .await
            }
        });
        wait_for(&dir.delete_calls, 1).await;

        delete_gate.send(Ok(())).unwrap();
        assert_eq!(delete.await.unwrap(), Outcome::Succeeded);

        create_gate
            .send(Err(DomainError::rejected(409, Some("duplicate email".into()))))
            .unwrap();
        assert_eq!(create.await.unwrap(), Outcome::Failed);

        let snapshot = client.snapshot().await;
        assert_eq!(snapshot.roster.message_text(), "User deleted successfully!");
        assert!(!snapshot.roster.loading());
        assert_eq!(snapshot.form.username, "ana");
    }

    #[tokio::test]
    async fn test_form_posted_during_submission_does_not_touch_it() {
        let dir = Arc::new(GatedDirectory::default());
        let release = dir.gate_create();
        let client = RosterClient::new(Arc::clone(&dir));
        fill_form(&client).await;

        let first = tokio::spawn({
            let client = client.clone();
            async move { client.submit().await }
        });
        wait_for(&dir.create_calls, 1).await;

        let second = FormState {
            username: "bo".to_string(),
            email: "bo@x.com".to_string(),
            date_of_birth: "1985-07-20".to_string(),
        };
        assert_eq!(client.submit_form(second).await, Outcome::Skipped);

        let snapshot = client.snapshot().await;
        assert_eq!(snapshot.roster.message_text(), "A submission is already in progress");
        assert_eq!(snapshot.form.username, "ana");
        assert_eq!(dir.create_calls.load(Ordering::SeqCst), 1);

        release
            .send(Err(DomainError::rejected(409, Some("duplicate email".into()))))
            .unwrap();
        assert_eq!(first.await.unwrap(), Outcome::Failed);

        let snapshot = client.snapshot().await;
        assert_eq!(snapshot.roster.message_text(), "duplicate email");
        assert_eq!(snapshot.form.username, "ana");
        assert_eq!(snapshot.form.email, "ana@x.com");
        assert!(!snapshot.roster.loading());
    }
}
