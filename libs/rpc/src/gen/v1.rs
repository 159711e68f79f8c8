// @generated
// This file is @generated by prost-build.
/// Task we have to do
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Todo {
    /// Unique integer identifier of the todo task
    #[prost(int64, tag="1")]
    pub id: i64,
    /// Title of the task
    #[prost(string, tag="2")]
    pub title: ::prost::alloc::string::String,
    /// Detail description of the todo task
    #[prost(string, tag="3")]
    pub description: ::prost::alloc::string::String,
    /// Date and time the todo task was created
    #[prost(message, optional, tag="4")]
    pub created_at: ::core::option::Option<::prost_types::Timestamp>,
    /// Date and time the todo task was last updated
    #[prost(message, optional, tag="5")]
    pub updated_at: ::core::option::Option<::prost_types::Timestamp>,
}
/// Request data to create new todo task
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateRequest {
    /// API version the caller speaks; must match the server
    #[prost(string, tag="1")]
    pub api: ::prost::alloc::string::String,
    /// Task entity to add
    #[prost(message, optional, tag="2")]
    pub todo: ::core::option::Option<Todo>,
}
/// Contains data of created todo task
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateResponse {
    #[prost(string, tag="1")]
    pub api: ::prost::alloc::string::String,
    /// ID of created task
    #[prost(int64, tag="2")]
    pub id: i64,
}
/// Request data to read todo task
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ReadRequest {
    #[prost(string, tag="1")]
    pub api: ::prost::alloc::string::String,
    /// Unique integer identifier of the todo task
    #[prost(int64, tag="2")]
    pub id: i64,
}
/// Contains todo task data specified in by ID request
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ReadResponse {
    #[prost(string, tag="1")]
    pub api: ::prost::alloc::string::String,
    #[prost(message, optional, tag="2")]
    pub todo: ::core::option::Option<Todo>,
}
/// Request data to update todo task. `todo.created_at` is ignored.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpdateRequest {
    #[prost(string, tag="1")]
    pub api: ::prost::alloc::string::String,
    #[prost(message, optional, tag="2")]
    pub todo: ::core::option::Option<Todo>,
}
/// Contains status of update operation
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpdateResponse {
    #[prost(string, tag="1")]
    pub api: ::prost::alloc::string::String,
    /// Number of entities have been updated (always 1 on success)
    #[prost(int64, tag="2")]
    pub updated: i64,
}
/// Request data to delete todo task
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeleteRequest {
    #[prost(string, tag="1")]
    pub api: ::prost::alloc::string::String,
    #[prost(int64, tag="2")]
    pub id: i64,
}
/// Contains status of delete operation
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeleteResponse {
    #[prost(string, tag="1")]
    pub api: ::prost::alloc::string::String,
    /// Number of entities have been deleted (always 1 on success)
    #[prost(int64, tag="2")]
    pub deleted: i64,
}
/// Request data to read all todo tasks
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ReadAllRequest {
    #[prost(string, tag="1")]
    pub api: ::prost::alloc::string::String,
}
/// Contains list of all todo tasks
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ReadAllResponse {
    #[prost(string, tag="1")]
    pub api: ::prost::alloc::string::String,
    #[prost(message, repeated, tag="2")]
    pub todos: ::prost::alloc::vec::Vec<Todo>,
}
include!("v1.tonic.rs");
// @@protoc_insertion_point(module)
