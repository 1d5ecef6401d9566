use crate::adapter::Adapter;
use crate::domain::{EmailAddress, NewUser, UserName};
use crate::models::NewUserRow;
use crate::routes::{ApiError, RequiredFields};
use diesel::prelude::*;
use rocket::serde::json::{json, Json, Value};
use rocket::State;
use uuid::Uuid;

#[derive(serde::Deserialize, Default, Debug)]
pub struct AddUserBody {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[tracing::instrument(
    name = "Adding a new user",
    skip(body, adapter),
    fields(request_id = %Uuid::new_v4())
)]
#[post("/addUser", data = "<body>")]
pub async fn add_user(
    body: Json<AddUserBody>,
    adapter: &State<Adapter>,
) -> Result<Json<Value>, ApiError> {
    let user_id = register_user(adapter, body.into_inner()).await?;
    Ok(Json(json!({
        "message": "User added successfully",
        "user_id": user_id,
    })))
}

pub async fn register_user(adapter: &Adapter, body: AddUserBody) -> Result<i32, ApiError> {
    let mut required = RequiredFields::default();
    let name = required.take_text("name", body.name);
    let email = required.take_text("email", body.email);
    let (Some(name), Some(email)) = (name, email) else {
        return Err(required.into_error());
    };
    let new_user = NewUser {
        name: UserName::parse(name).map_err(ApiError::InvalidField)?,
        email: EmailAddress::parse(email).map_err(ApiError::InvalidField)?,
    };
    adapter.run(move |conn| insert_user(conn, &new_user)).await
}

#[tracing::instrument(
    name = "Saving new user details in the database",
    skip(conn, new_user)
)]
fn insert_user(conn: &mut PgConnection, new_user: &NewUser) -> Result<i32, ApiError> {
    use crate::schema::users;
    let user_id = diesel::insert_into(users::table)
        .values(NewUserRow {
            name: new_user.name.as_ref(),
            email: new_user.email.as_ref(),
        })
        .returning(users::user_id)
        .get_result::<i32>(conn)?;
    Ok(user_id)
}
