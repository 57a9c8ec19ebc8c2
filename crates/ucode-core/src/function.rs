// ── Object function facade ──
//
// Binds a `Config` to the object client and shapes every call into
// `Result<Outcome<T>, Failure>`. The object client is rebuilt from the
// config on each call, so identity and base URL changes apply to the next
// operation. The HTTP transport is rebuilt only by `set_timeout`.

use std::time::Duration;

use tracing::debug;

use ucode_api::{
    AggregationResponse, Argument, CreateObjectResponse, Error, ErrorKind, MultipleUpdateResponse,
    MultipleUpsertResponse, ObjectClient, ObjectListResponse, SingleObjectResponse, Transport,
    UpdateObjectResponse,
};

use crate::config::Config;
use crate::error::CoreError;
use crate::logger::FunctionLogger;
use crate::notify::Dispatcher;
use crate::response::{Failure, Outcome, Response, Status};

// ── Operation table ──────────────────────────────────────────────────

/// Every object operation, with its diagnostics text and success status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
    CreateObject,
    UpdateObject,
    MultipleUpdate,
    GetList,
    GetListSlim,
    GetListAggregate,
    GetSingle,
    GetSingleSlim,
    GetListAggregation,
    MultipleUpsert,
    AppendManyToMany,
    DeleteManyToMany,
    Delete,
    MultipleDelete,
}

impl Operation {
    /// Diagnostic message for a failed request.
    pub fn request_message(self) -> &'static str {
        match self {
            Self::UpdateObject => "Error while updating object",
            Self::MultipleUpdate => "Error while multiple updating objects",
            Self::MultipleUpsert => "Error while multiple upserting items",
            Self::AppendManyToMany => "Error while appending many-to-many object",
            Self::DeleteManyToMany => "Error while deleting many-to-many object",
            Self::Delete => "Error while deleting object",
            Self::MultipleDelete => "Error while deleting objects",
            Self::CreateObject
            | Self::GetList
            | Self::GetListSlim
            | Self::GetListAggregate
            | Self::GetSingle
            | Self::GetSingleSlim
            | Self::GetListAggregation => "Can't send request",
        }
    }

    /// Diagnostic message for a body that did not match the envelope.
    pub fn decode_message(self) -> &'static str {
        match self {
            Self::CreateObject => "Error while unmarshalling create object",
            Self::UpdateObject => "Error while unmarshalling update object",
            Self::MultipleUpdate => "Error while unmarshalling multiple update objects",
            Self::MultipleUpsert => "Error while unmarshalling multiple upsert items",
            Self::GetSingleSlim => "Error while unmarshalling to object",
            Self::GetList
            | Self::GetListSlim
            | Self::GetListAggregate
            | Self::GetSingle
            | Self::GetListAggregation => "Error while unmarshalling get list object",
            Self::AppendManyToMany
            | Self::DeleteManyToMany
            | Self::Delete
            | Self::MultipleDelete => self.request_message(),
        }
    }

    /// Status reported on success. Reads and link operations leave it unset.
    pub fn success_status(self) -> Status {
        match self {
            Self::CreateObject
            | Self::UpdateObject
            | Self::MultipleUpdate
            | Self::MultipleUpsert
            | Self::Delete
            | Self::MultipleDelete => Status::Done,
            Self::GetList
            | Self::GetListSlim
            | Self::GetListAggregate
            | Self::GetSingle
            | Self::GetSingleSlim
            | Self::GetListAggregation
            | Self::AppendManyToMany
            | Self::DeleteManyToMany => Status::Unset,
        }
    }

    fn fail(self, error: Error) -> Failure {
        let message = match error.kind() {
            ErrorKind::Shape => self.decode_message(),
            _ => self.request_message(),
        };
        debug!(operation = %self, error = %error, "object operation failed");
        Failure::new(message, error)
    }

    fn finish<T>(self, result: Result<T, Error>) -> Result<Outcome<T>, Failure> {
        result
            .map(|data| Outcome {
                data,
                response: Response::with_status(self.success_status()),
            })
            .map_err(|e| self.fail(e))
    }
}

// ── ObjectFunction ───────────────────────────────────────────────────

/// Entry point for functions built on the SDK.
#[derive(Debug, Clone)]
pub struct ObjectFunction {
    config: Config,
    transport: Transport,
    logger: FunctionLogger,
}

impl ObjectFunction {
    /// Build the shared HTTP client from the config's transport settings.
    pub fn new(config: Config) -> Result<Self, CoreError> {
        let transport = Transport::new(&config.transport_config())?;
        Ok(Self::with_transport(config, transport))
    }

    pub fn with_transport(config: Config, transport: Transport) -> Self {
        let logger = FunctionLogger::new(config.function_name.clone());
        Self {
            config,
            transport,
            logger,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Mutable access for the identity, base URL and bot token setters.
    ///
    /// `Config::timeout` is read only when the transport is built; change
    /// it through [`ObjectFunction::set_timeout`].
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Replace the per-request timeout and rebuild the shared HTTP client.
    pub fn set_timeout(&mut self, timeout: Option<Duration>) -> Result<(), CoreError> {
        self.config.timeout = timeout;
        self.transport = Transport::new(&self.config.transport_config())?;
        debug!(?timeout, "transport rebuilt");
        Ok(())
    }

    pub fn logger(&self) -> &FunctionLogger {
        &self.logger
    }

    /// Notification senders bound to this function's config.
    pub fn dispatcher(&self) -> Dispatcher<'_> {
        Dispatcher::new(&self.config, self.transport.http().clone())
    }

    fn objects(&self, op: Operation) -> Result<ObjectClient, Failure> {
        ObjectClient::new(
            self.transport.clone(),
            &self.config.base_url,
            self.config.app_id.clone(),
        )
        .map_err(|e| op.fail(e))
    }

    // ── Writes ───────────────────────────────────────────────────────

    pub async fn create_object(
        &self,
        arg: &Argument,
    ) -> Result<Outcome<CreateObjectResponse>, Failure> {
        let op = Operation::CreateObject;
        op.finish(self.objects(op)?.create_object(arg).await)
    }

    pub async fn update_object(
        &self,
        arg: &Argument,
    ) -> Result<Outcome<UpdateObjectResponse>, Failure> {
        let op = Operation::UpdateObject;
        op.finish(self.objects(op)?.update_object(arg).await)
    }

    pub async fn multiple_update(
        &self,
        arg: &Argument,
    ) -> Result<Outcome<MultipleUpdateResponse>, Failure> {
        let op = Operation::MultipleUpdate;
        op.finish(self.objects(op)?.multiple_update(arg).await)
    }

    pub async fn multiple_upsert(
        &self,
        arg: &Argument,
    ) -> Result<Outcome<MultipleUpsertResponse>, Failure> {
        let op = Operation::MultipleUpsert;
        op.finish(self.objects(op)?.multiple_upsert(arg).await)
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Paged listing. `page`/`limit` are normalized and `offset` is written
    /// back into `arg.request.data`.
    pub async fn get_list(
        &self,
        arg: &mut Argument,
    ) -> Result<Outcome<ObjectListResponse>, Failure> {
        let op = Operation::GetList;
        op.finish(self.objects(op)?.get_list(arg).await)
    }

    pub async fn get_list_slim(
        &self,
        arg: &Argument,
    ) -> Result<Outcome<ObjectListResponse>, Failure> {
        let op = Operation::GetListSlim;
        op.finish(self.objects(op)?.get_list_slim(arg).await)
    }

    pub async fn get_list_aggregate(
        &self,
        arg: &Argument,
    ) -> Result<Outcome<ObjectListResponse>, Failure> {
        let op = Operation::GetListAggregate;
        op.finish(self.objects(op)?.get_list_aggregate(arg).await)
    }

    pub async fn get_single(
        &self,
        arg: &Argument,
    ) -> Result<Outcome<SingleObjectResponse>, Failure> {
        let op = Operation::GetSingle;
        op.finish(self.objects(op)?.get_single(arg).await)
    }

    pub async fn get_single_slim(
        &self,
        arg: &Argument,
    ) -> Result<Outcome<SingleObjectResponse>, Failure> {
        let op = Operation::GetSingleSlim;
        op.finish(self.objects(op)?.get_single_slim(arg).await)
    }

    pub async fn get_list_aggregation(
        &self,
        arg: &Argument,
    ) -> Result<Outcome<AggregationResponse>, Failure> {
        let op = Operation::GetListAggregation;
        op.finish(self.objects(op)?.get_list_aggregation(arg).await)
    }

    // ── Side-effect only ─────────────────────────────────────────────

    pub async fn append_many_to_many(&self, arg: &Argument) -> Result<Response, Failure> {
        let op = Operation::AppendManyToMany;
        let result = self.objects(op)?.append_many_to_many(arg).await;
        op.finish(result).map(|o| o.response)
    }

    pub async fn delete_many_to_many(&self, arg: &Argument) -> Result<Response, Failure> {
        let op = Operation::DeleteManyToMany;
        let result = self.objects(op)?.delete_many_to_many(arg).await;
        op.finish(result).map(|o| o.response)
    }

    pub async fn delete(&self, arg: &Argument) -> Result<Response, Failure> {
        let op = Operation::Delete;
        let result = self.objects(op)?.delete(arg).await;
        op.finish(result).map(|o| o.response)
    }

    pub async fn multiple_delete(&self, arg: &Argument) -> Result<Response, Failure> {
        let op = Operation::MultipleDelete;
        let result = self.objects(op)?.multiple_delete(arg).await;
        op.finish(result).map(|o| o.response)
    }
}
