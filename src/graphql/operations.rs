//! Todo Operations
//!
//! GraphQL documents for the `todos` table and their typed variables and
//! response data. Every selection asks for `__typename` so rows can be
//! normalized by the cache.

use graphql_client::{GraphQLQuery, QueryBody};
use serde::{Deserialize, Serialize};

use crate::models::{TodoId, TodoItem};

// ========================
// Documents
// ========================

pub const GET_TODOS: &str = r#"query GetTodos {
  todos {
    __typename
    id
    text
    done
  }
}"#;

pub const TOGGLE_TODO: &str = r#"mutation ToggleTodo($id: uuid!, $done: Boolean!) {
  update_todos(where: { id: { _eq: $id } }, _set: { done: $done }) {
    returning {
      __typename
      id
      text
      done
    }
  }
}"#;

pub const ADD_TODO: &str = r#"mutation AddTodo($text: String!) {
  insert_todos(objects: { text: $text }) {
    returning {
      __typename
      id
      text
      done
    }
  }
}"#;

pub const DELETE_TODO: &str = r#"mutation DeleteTodo($id: uuid!) {
  delete_todos(where: { id: { _eq: $id } }) {
    returning {
      __typename
      id
      text
      done
    }
  }
}"#;

// ========================
// Shared Shapes
// ========================

/// Variables of an operation that takes none (serialized as `null`)
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct NoVariables;

/// Hasura `*_mutation_response` payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Returning {
    pub returning: Vec<TodoItem>,
}

fn body<V>(variables: V, query: &'static str, operation_name: &'static str) -> QueryBody<V> {
    QueryBody {
        variables,
        query,
        operation_name,
    }
}

// ========================
// GetTodos
// ========================

pub struct GetTodos;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetTodosData {
    pub todos: Vec<TodoItem>,
}

impl GraphQLQuery for GetTodos {
    type Variables = NoVariables;
    type ResponseData = GetTodosData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        body(variables, GET_TODOS, "GetTodos")
    }
}

// ========================
// ToggleTodo
// ========================

pub struct ToggleTodo;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToggleTodoVariables {
    pub id: TodoId,
    pub done: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToggleTodoData {
    pub update_todos: Option<Returning>,
}

impl GraphQLQuery for ToggleTodo {
    type Variables = ToggleTodoVariables;
    type ResponseData = ToggleTodoData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        body(variables, TOGGLE_TODO, "ToggleTodo")
    }
}

// ========================
// AddTodo
// ========================

pub struct AddTodo;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddTodoVariables {
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddTodoData {
    pub insert_todos: Option<Returning>,
}

impl GraphQLQuery for AddTodo {
    type Variables = AddTodoVariables;
    type ResponseData = AddTodoData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        body(variables, ADD_TODO, "AddTodo")
    }
}

// ========================
// DeleteTodo
// ========================

pub struct DeleteTodo;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteTodoVariables {
    pub id: TodoId,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteTodoData {
    pub delete_todos: Option<Returning>,
}

impl GraphQLQuery for DeleteTodo {
    type Variables = DeleteTodoVariables;
    type ResponseData = DeleteTodoData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        body(variables, DELETE_TODO, "DeleteTodo")
    }
}
