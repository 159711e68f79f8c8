//! Todo gRPC service implementation
//!
//! Every handler runs the same pipeline: API version gate, request
//! validation, domain call, response encoding. Failures are `TodoError`s and
//! reach the caller through `From<TodoError> for Status`.

use std::sync::Arc;

use domain_todos::{CreateTodo, TodoError, TodoRepository, TodoService, UpdateTodo};
use grpc_client::request_id;
use rpc::v1::{
    self, CreateRequest, CreateResponse, DeleteRequest, DeleteResponse, ReadAllRequest, ReadAllResponse,
    ReadRequest, ReadResponse, UpdateRequest, UpdateResponse, todo_service_server::TodoService as TodoGrpc,
};
use tonic::{Request, Response, Status};
use tracing::debug;

/// gRPC service implementation for todos
///
/// Generic over the repository type for testability.
pub struct TodoServiceImpl<R>
where
    R: TodoRepository + 'static,
{
    service: Arc<TodoService<R>>,
}

impl<R> TodoServiceImpl<R>
where
    R: TodoRepository + 'static,
{
    pub fn new(service: TodoService<R>) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    fn api(&self) -> String {
        self.service.api_version().to_string()
    }
}

/// Affected-row counts travel as `int64`
fn wire_count(count: u64) -> Result<i64, TodoError> {
    i64::try_from(count).map_err(|_| TodoError::RowCountOverflow(count))
}

#[tonic::async_trait]
impl<R> TodoGrpc for TodoServiceImpl<R>
where
    R: TodoRepository + 'static,
{
    async fn create(&self, request: Request<CreateRequest>) -> Result<Response<CreateResponse>, Status> {
        debug!(request_id = request_id(&request), "Create");
        let req = request.into_inner();
        self.service.check_api(&req.api)?;

        let input = CreateTodo::try_from(req.todo.ok_or(TodoError::MissingField("todo"))?)?;
        let id = self.service.create_todo(input).await?;

        Ok(Response::new(CreateResponse { api: self.api(), id }))
    }

    async fn read(&self, request: Request<ReadRequest>) -> Result<Response<ReadResponse>, Status> {
        debug!(request_id = request_id(&request), "Read");
        let req = request.into_inner();
        self.service.check_api(&req.api)?;

        let todo = self.service.get_todo(req.id).await?;

        Ok(Response::new(ReadResponse {
            api: self.api(),
            todo: Some(v1::Todo::try_from(todo)?),
        }))
    }

    async fn update(&self, request: Request<UpdateRequest>) -> Result<Response<UpdateResponse>, Status> {
        debug!(request_id = request_id(&request), "Update");
        let req = request.into_inner();
        self.service.check_api(&req.api)?;

        let todo = req.todo.ok_or(TodoError::MissingField("todo"))?;
        let id = todo.id;
        let updated = self.service.update_todo(id, UpdateTodo::try_from(todo)?).await?;

        Ok(Response::new(UpdateResponse {
            api: self.api(),
            updated: wire_count(updated)?,
        }))
    }

    async fn delete(&self, request: Request<DeleteRequest>) -> Result<Response<DeleteResponse>, Status> {
        debug!(request_id = request_id(&request), "Delete");
        let req = request.into_inner();
        self.service.check_api(&req.api)?;

        let deleted = self.service.delete_todo(req.id).await?;

        Ok(Response::new(DeleteResponse {
            api: self.api(),
            deleted: wire_count(deleted)?,
        }))
    }

    async fn read_all(&self, request: Request<ReadAllRequest>) -> Result<Response<ReadAllResponse>, Status> {
        debug!(request_id = request_id(&request), "ReadAll");
        let req = request.into_inner();
        self.service.check_api(&req.api)?;

        let todos = self
            .service
            .list_todos()
            .await?
            .into_iter()
            .map(v1::Todo::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Response::new(ReadAllResponse { api: self.api(), todos }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use domain_todos::{Todo, TodoResult};
    use grpc_client::REQUEST_ID_HEADER;
    use prost_types::Timestamp;
    use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
    use std::sync::Mutex;
    use test_utils::assertions::{assert_code, assert_some};
    use tonic::Code;

    /// In-memory repository with call counting and an injectable outage
    #[derive(Clone, Default)]
    struct MemoryRepository {
        rows: Arc<Mutex<Vec<Todo>>>,
        next_id: Arc<AtomicI64>,
        calls: Arc<AtomicUsize>,
        unavailable: Arc<AtomicBool>,
    }

    impl MemoryRepository {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn len(&self) -> usize {
            self.rows.lock().unwrap().len()
        }

        fn enter(&self) -> TodoResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(TodoError::Connection(sqlx::Error::PoolTimedOut));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl TodoRepository for MemoryRepository {
        async fn insert(&self, input: CreateTodo) -> TodoResult<i64> {
            self.enter()?;
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            self.rows.lock().unwrap().push(Todo {
                id,
                title: input.title,
                description: input.description,
                created_at: input.created_at,
                updated_at: input.updated_at,
            });
            Ok(id)
        }

        async fn find_by_id(&self, id: i64) -> TodoResult<Vec<Todo>> {
            self.enter()?;
            Ok(self.rows.lock().unwrap().iter().filter(|t| t.id == id).cloned().collect())
        }

        async fn find_all(&self) -> TodoResult<Vec<Todo>> {
            self.enter()?;
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn update(&self, id: i64, input: UpdateTodo) -> TodoResult<u64> {
            self.enter()?;
            let mut updated = 0;
            for todo in self.rows.lock().unwrap().iter_mut().filter(|t| t.id == id) {
                todo.title = input.title.clone();
                todo.description = input.description.clone();
                todo.updated_at = input.updated_at;
                updated += 1;
            }
            Ok(updated)
        }

        async fn delete(&self, id: i64) -> TodoResult<u64> {
            self.enter()?;
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|t| t.id != id);
            Ok((before - rows.len()) as u64)
        }
    }

    fn setup() -> (TodoServiceImpl<MemoryRepository>, MemoryRepository) {
        let repo = MemoryRepository::default();
        (TodoServiceImpl::new(TodoService::new(repo.clone())), repo)
    }

    fn ts(seconds: i64) -> Option<Timestamp> {
        Some(Timestamp { seconds, nanos: 0 })
    }

    fn wire_todo(id: i64, title: &str, description: &str, at: i64) -> v1::Todo {
        v1::Todo {
            id,
            title: title.to_string(),
            description: description.to_string(),
            created_at: ts(at),
            updated_at: ts(at),
        }
    }

    fn create_req(api: &str, todo: Option<v1::Todo>) -> Request<CreateRequest> {
        Request::new(CreateRequest { api: api.to_string(), todo })
    }

    #[tokio::test]
    async fn test_full_lifecycle() {
        let (svc, repo) = setup();
        let t0 = 1_717_243_200;

        let created = svc
            .create(create_req("v1", Some(wire_todo(0, "title (1)", "description (1)", t0))))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(created.api, "v1");
        assert!(created.id > 0);
        let id = created.id;

        let read = svc
            .read(Request::new(ReadRequest { api: "v1".into(), id }))
            .await
            .unwrap()
            .into_inner();
        let todo = assert_some(read.todo, "read after create");
        assert_eq!(todo.id, id);
        assert_eq!(todo.title, "title (1)");
        assert_eq!(todo.description, "description (1)");
        assert_eq!(todo.created_at, ts(t0));

        let t1 = t0 + 60;
        let mut changed = wire_todo(id, "title (1)", "description (1) + updated", t1);
        changed.created_at = ts(0);
        let updated = svc
            .update(Request::new(UpdateRequest {
                api: "v1".into(),
                todo: Some(changed),
            }))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(updated.api, "v1");
        assert_eq!(updated.updated, 1);

        let all = svc
            .read_all(Request::new(ReadAllRequest { api: "v1".into() }))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(all.todos.len(), 1);
        assert_eq!(all.todos[0].description, "description (1) + updated");
        assert_eq!(all.todos[0].created_at, ts(t0), "created_at must survive update");
        assert_eq!(all.todos[0].updated_at, ts(t1));

        let deleted = svc
            .delete(Request::new(DeleteRequest { api: "v1".into(), id }))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(deleted.deleted, 1);

        let status = assert_code(
            svc.read(Request::new(ReadRequest { api: "v1".into(), id })).await,
            Code::NotFound,
            "read after delete",
        );
        assert_eq!(status.message(), format!("Todo with id = {} not found", id));
        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn test_version_mismatch_never_reaches_store() {
        let (svc, repo) = setup();
        let todo = Some(wire_todo(1, "t", "d", 0));

        assert_code(svc.create(create_req("v2", todo.clone())).await, Code::Unimplemented, "create");
        assert_code(
            svc.read(Request::new(ReadRequest { api: "".into(), id: 1 })).await,
            Code::Unimplemented,
            "read",
        );
        assert_code(
            svc.update(Request::new(UpdateRequest { api: "V1".into(), todo })).await,
            Code::Unimplemented,
            "update",
        );
        assert_code(
            svc.delete(Request::new(DeleteRequest { api: "v0".into(), id: 1 })).await,
            Code::Unimplemented,
            "delete",
        );
        let status = assert_code(
            svc.read_all(Request::new(ReadAllRequest { api: "v2".into() })).await,
            Code::Unimplemented,
            "read_all",
        );

        assert!(status.message().contains("'v1'"));
        assert!(status.message().contains("'v2'"));
        assert_eq!(repo.calls(), 0);
    }

    #[tokio::test]
    async fn test_version_checked_before_payload() {
        let (svc, repo) = setup();

        assert_code(svc.create(create_req("v2", None)).await, Code::Unimplemented, "create");
        assert_eq!(repo.calls(), 0);
    }

    #[tokio::test]
    async fn test_malformed_timestamp_never_reaches_store() {
        let (svc, repo) = setup();

        let mut bad_nanos = wire_todo(0, "t", "d", 0);
        bad_nanos.created_at = Some(Timestamp { seconds: 0, nanos: -1 });
        let status = assert_code(svc.create(create_req("v1", Some(bad_nanos))).await, Code::InvalidArgument, "create");
        assert!(status.message().starts_with("created_at has invalid format"));

        let mut bad_seconds = wire_todo(1, "t", "d", 0);
        bad_seconds.updated_at = ts(253_402_300_800);
        assert_code(
            svc.update(Request::new(UpdateRequest {
                api: "v1".into(),
                todo: Some(bad_seconds),
            }))
            .await,
            Code::InvalidArgument,
            "update",
        );

        assert_eq!(repo.calls(), 0);
        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn test_missing_payload_is_invalid_argument() {
        let (svc, repo) = setup();

        let status = assert_code(svc.create(create_req("v1", None)).await, Code::InvalidArgument, "create");
        assert_eq!(status.message(), "todo is required");

        let mut no_updated_at = wire_todo(0, "t", "d", 0);
        no_updated_at.updated_at = None;
        assert_code(svc.create(create_req("v1", Some(no_updated_at))).await, Code::InvalidArgument, "create");

        assert_code(
            svc.update(Request::new(UpdateRequest { api: "v1".into(), todo: None })).await,
            Code::InvalidArgument,
            "update",
        );
        assert_eq!(repo.calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_ids_are_not_found() {
        let (svc, _repo) = setup();

        let status = assert_code(
            svc.update(Request::new(UpdateRequest {
                api: "v1".into(),
                todo: Some(wire_todo(42, "t", "d", 0)),
            }))
            .await,
            Code::NotFound,
            "update",
        );
        assert_eq!(status.message(), "Todo with id = 42 not found");

        assert_code(
            svc.delete(Request::new(DeleteRequest { api: "v1".into(), id: 42 })).await,
            Code::NotFound,
            "delete",
        );
    }

    #[tokio::test]
    async fn test_undecodable_stored_timestamp_is_unknown() {
        let (svc, repo) = setup();
        let valid = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let far_future = Utc.with_ymd_and_hms(10000, 1, 1, 0, 0, 0).unwrap();
        {
            let mut rows = repo.rows.lock().unwrap();
            rows.push(Todo {
                id: 1,
                title: "t".into(),
                description: "valid".into(),
                created_at: valid,
                updated_at: valid,
            });
            rows.push(Todo {
                id: 2,
                title: "t".into(),
                description: "unrepresentable".into(),
                created_at: valid,
                updated_at: far_future,
            });
        }

        let status = assert_code(
            svc.read_all(Request::new(ReadAllRequest { api: "v1".into() })).await,
            Code::Unknown,
            "read_all",
        );
        assert!(status.message().starts_with("updated_at field has invalid format"), "{}", status.message());

        let status = assert_code(
            svc.read(Request::new(ReadRequest { api: "v1".into(), id: 2 })).await,
            Code::Unknown,
            "read",
        );
        assert!(status.message().contains("updated_at"));

        let read = svc
            .read(Request::new(ReadRequest { api: "v1".into(), id: 1 }))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(assert_some(read.todo, "valid row").description, "valid");
    }

    #[tokio::test]
    async fn test_sub_microsecond_timestamp_never_reaches_store() {
        let (svc, repo) = setup();
        let mut todo = wire_todo(0, "t", "d", 1_700_000_000);
        todo.created_at = Some(Timestamp {
            seconds: 1_700_000_000,
            nanos: 123_456_789,
        });

        let status = assert_code(svc.create(create_req("v1", Some(todo))).await, Code::InvalidArgument, "create");
        assert!(status.message().starts_with("created_at has invalid format"), "{}", status.message());
        assert_eq!(repo.calls(), 0);
    }

    #[tokio::test]
    async fn test_microsecond_timestamp_round_trips() {
        let (svc, _repo) = setup();
        let precise = Some(Timestamp {
            seconds: 1_700_000_000,
            nanos: 123_456_000,
        });
        let mut todo = wire_todo(0, "t", "d", 0);
        todo.created_at = precise;
        todo.updated_at = precise;

        let id = svc.create(create_req("v1", Some(todo))).await.unwrap().into_inner().id;
        let read = svc
            .read(Request::new(ReadRequest { api: "v1".into(), id }))
            .await
            .unwrap()
            .into_inner();
        let read = assert_some(read.todo, "read");
        assert_eq!(read.created_at, precise);
        assert_eq!(read.updated_at, precise);
    }

    #[test]
    fn test_wire_count() {
        assert_eq!(wire_count(1).unwrap(), 1);
        assert_eq!(wire_count(i64::MAX as u64).unwrap(), i64::MAX);

        let status = Status::from(wire_count(u64::MAX).unwrap_err());
        assert_eq!(status.code(), Code::Unknown);
    }

    #[tokio::test]
    async fn test_duplicate_rows_are_unknown() {
        let (svc, repo) = setup();
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        for description in ["first", "second"] {
            repo.rows.lock().unwrap().push(Todo {
                id: 7,
                title: "t".into(),
                description: description.into(),
                created_at: at,
                updated_at: at,
            });
        }

        assert_code(
            svc.read(Request::new(ReadRequest { api: "v1".into(), id: 7 })).await,
            Code::Unknown,
            "read",
        );
    }

    #[tokio::test]
    async fn test_store_outage_is_unknown() {
        let (svc, repo) = setup();
        repo.unavailable.store(true, Ordering::SeqCst);

        let status = assert_code(
            svc.read_all(Request::new(ReadAllRequest { api: "v1".into() })).await,
            Code::Unknown,
            "read_all",
        );
        assert!(status.message().starts_with("failed to connect to database"));

        assert_code(
            svc.create(create_req("v1", Some(wire_todo(0, "t", "d", 0)))).await,
            Code::Unknown,
            "create",
        );
    }

    #[tokio::test]
    async fn test_empty_store_reads_empty_list() {
        let (svc, _repo) = setup();

        let all = svc
            .read_all(Request::new(ReadAllRequest { api: "v1".into() }))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(all.api, "v1");
        assert!(all.todos.is_empty());
    }

    #[tokio::test]
    async fn test_request_id_is_optional() {
        let (svc, _repo) = setup();
        let mut request = create_req("v1", Some(wire_todo(0, "t", "d", 0)));
        request.metadata_mut().insert(REQUEST_ID_HEADER, "abc-123".parse().unwrap());

        assert_eq!(request_id(&request), Some("abc-123"));
        assert!(svc.create(request).await.is_ok());
    }
}
