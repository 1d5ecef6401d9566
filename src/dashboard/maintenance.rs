use crate::adapter::{Adapter, EmailStatus};
use crate::dashboard::{filled, render, Feedback, MISSING_FIELDS};
use crate::routes::ApiError;
use askama::Template;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use rocket::form::Form;
use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::State;

#[derive(Template)]
#[template(path = "dashboard/db_time.html")]
struct DbTimePage {
    feedback: Feedback,
}

#[derive(Template)]
#[template(path = "dashboard/send_email.html")]
struct SendEmailPage {
    feedback: Feedback,
}

#[derive(Template)]
#[template(path = "emails/message.html")]
struct MessageHtml<'a> {
    body: &'a str,
}

#[derive(FromForm)]
pub struct EmailForm {
    recipient: Option<String>,
    subject: Option<String>,
    body: Option<String>,
}

#[get("/db-time")]
pub fn db_time_page() -> Result<RawHtml<String>, Status> {
    render(&DbTimePage {
        feedback: Feedback::notice("Click 'Read from DB' to read the database clock."),
    })
}

#[tracing::instrument(name = "Dashboard: read the database clock", skip(adapter))]
#[post("/db-time")]
pub async fn db_time_submit(adapter: &State<Adapter>) -> Result<RawHtml<String>, Status> {
    let feedback = match adapter.run(database_time).await {
        Ok(now) => Feedback::notice(format!("Database current time: {}", now)),
        Err(e) => Feedback::error(e.to_string()),
    };
    render(&DbTimePage { feedback })
}

#[get("/send-email")]
pub fn send_email_page() -> Result<RawHtml<String>, Status> {
    render(&SendEmailPage {
        feedback: Feedback::notice("Enter email details and click 'Send email'."),
    })
}

#[tracing::instrument(name = "Dashboard: send an email", skip(form, adapter))]
#[post("/send-email", data = "<form>")]
pub async fn send_email_submit(
    form: Form<EmailForm>,
    adapter: &State<Adapter>,
) -> Result<RawHtml<String>, Status> {
    let (Some(recipient), Some(subject), Some(body)) = (
        filled(&form.recipient),
        filled(&form.subject),
        filled(&form.body),
    ) else {
        return render(&SendEmailPage {
            feedback: Feedback::error(MISSING_FIELDS),
        });
    };
    let feedback = match (MessageHtml { body }).render() {
        Err(e) => {
            tracing::error!(error.cause_chain = ?e, "Failed to render the email body");
            return Err(Status::InternalServerError);
        }
        Ok(html_content) => {
            match adapter
                .send_email(recipient, subject, &html_content, body)
                .await
            {
                EmailStatus::Sent => {
                    Feedback::notice(format!("Email sent successfully to {}!", recipient))
                }
                EmailStatus::Failed(e) => Feedback::error(format!("Error sending email: {}", e)),
            }
        }
    };
    render(&SendEmailPage { feedback })
}

#[tracing::instrument(name = "Read the database clock", skip(conn))]
fn database_time(conn: &mut PgConnection) -> Result<NaiveDateTime, ApiError> {
    let now = diesel::select(diesel::dsl::now).get_result::<NaiveDateTime>(conn)?;
    Ok(now)
}
