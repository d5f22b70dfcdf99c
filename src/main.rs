use std::process;

use tracing::error;

use crate::{
    dns::porkbun::PorkbunProvider,
    ip::echo::EchoIpSource,
    notify::twilio::TwilioNotifier,
    settings::Settings,
    updater::Updater,
};

mod dns;
mod ip;
mod notify;
mod settings;
mod updater;

#[tokio::main]
async fn main() {
    let subscriber = tracing_subscriber::FmtSubscriber::new();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to initialise logging: {e}");
        process::exit(1);
    }

    let cfg = match Settings::new() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("error in the configuration: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = run(cfg).await {
        error!("error updating the dns record: {e}");
        process::exit(1);
    }
}

async fn run(cfg: Settings) -> Result<(), Box<dyn std::error::Error>> {
    let provider = PorkbunProvider::new(cfg.porkbun)?;
    let resolver = EchoIpSource::new(cfg.ip.echo_url)?;
    let notifier = TwilioNotifier::new(cfg.twilio)?;

    let updater = Updater::new(provider, resolver, notifier);
    Ok(updater.run().await?)
}
