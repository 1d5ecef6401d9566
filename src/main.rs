use meetez::adapter::Adapter;
use meetez::configuration::get_configuration;
use meetez::secrets;
use meetez::startup::Application;
use meetez::telemetry::{get_subscriber, init_subscriber};

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("meetez".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber)?;

    let configuration = get_configuration()?;
    let secret_provider = secrets::from_settings(&configuration.secrets)?;
    let adapter = Adapter::build(&configuration, secret_provider.as_ref()).await?;

    let application = Application::build(&configuration, adapter).await?;
    application.server.launch().await?;
    Ok(())
}
