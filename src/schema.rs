use std::{path::Path, sync::Arc};

use async_graphql::{
    Context, EmptySubscription, ErrorExtensions, Object, Result, Schema, SimpleObject,
};
use tracing::info;

use crate::{
    auth::TokenService,
    model::{Session, Todo, TodoInput},
    store::TodoStore,
};

pub type TodoSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

// Response body of the `login` mutation
#[derive(Debug, SimpleObject)]
#[graphql(name = "Login")]
pub struct LoginPayload {
    pub token: String,
}

#[derive(Debug, SimpleObject)]
#[graphql(name = "CreateTodo")]
pub struct CreateTodoPayload {
    pub todo: Todo,
}

#[derive(Debug, SimpleObject)]
#[graphql(name = "DeleteTodo")]
pub struct DeleteTodoPayload {
    pub ok: bool,
}

#[derive(Debug, SimpleObject)]
#[graphql(name = "UpdateTodo")]
pub struct UpdateTodoPayload {
    pub todo: Todo,
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Greets the caller, preferring the username from a valid bearer token.
    async fn hello(
        &self,
        ctx: &Context<'_>,
        #[graphql(default_with = "String::from(\"stranger\")")] first_name: String,
    ) -> String {
        match ctx.data_opt::<Session>().and_then(Session::username) {
            Some(username) => format!("Hello {username}"),
            None => format!("Hello {first_name}!"),
        }
    }

    async fn todos(&self, ctx: &Context<'_>) -> Vec<Todo> {
        ctx.data_unchecked::<Arc<TodoStore>>().list().await
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn login(
        &self,
        ctx: &Context<'_>,
        username: String,
        password: String,
    ) -> Result<LoginPayload> {
        let tokens = ctx.data_unchecked::<TokenService>();
        let token = tokens
            .issue_token(&username, &password)
            .map_err(|e| e.extend())?;
        Ok(LoginPayload { token })
    }

    async fn create_todo(&self, ctx: &Context<'_>, text: String) -> Result<CreateTodoPayload> {
        let todo = ctx
            .data_unchecked::<Arc<TodoStore>>()
            .create(text)
            .await
            .map_err(|e| e.extend())?;
        Ok(CreateTodoPayload { todo })
    }

    async fn delete_todo(&self, ctx: &Context<'_>, id: i32) -> Result<DeleteTodoPayload> {
        let ok = ctx
            .data_unchecked::<Arc<TodoStore>>()
            .delete(id)
            .await
            .map_err(|e| e.extend())?;
        Ok(DeleteTodoPayload { ok })
    }

    async fn update_todo(
        &self,
        ctx: &Context<'_>,
        todo_data: TodoInput,
    ) -> Result<UpdateTodoPayload> {
        let todo = ctx
            .data_unchecked::<Arc<TodoStore>>()
            .update(todo_data.id, todo_data.text)
            .await
            .map_err(|e| e.extend())?;
        Ok(UpdateTodoPayload { todo })
    }
}

pub fn build_schema(store: Arc<TodoStore>, tokens: TokenService) -> TodoSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(store)
        .data(tokens)
        .finish()
}

// Write the schema in SDL form, e.g. to `schema.graphql`
pub fn export_sdl(schema: &TodoSchema, path: &Path) -> std::io::Result<()> {
    std::fs::write(path, schema.sdl())?;
    info!(path = %path.display(), "wrote GraphQL schema");
    Ok(())
}
