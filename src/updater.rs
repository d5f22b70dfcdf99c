use std::fmt::{Debug, Display, Formatter};

use tracing::{error, info};

use crate::{dns::Provider, ip::Source, notify::Notifier};

/// Message sent whenever the record is rewritten.
const NOTIFICATION_BODY: &str = "Your IP has changed";

#[derive(Debug)]
pub struct Updater<D: Provider, I: Source, N: Notifier> {
    provider: D,
    resolver: I,
    notifier: N,
}

impl<D: Provider, I: Source, N: Notifier> Updater<D, I, N> {
    pub fn new(provider: D, resolver: I, notifier: N) -> Self {
        Self {
            provider,
            resolver,
            notifier,
        }
    }

    /// One full check-and-update pass. The record is only rewritten when the
    /// observed public IP differs from the published content.
    #[tracing::instrument(skip(self), level = "info")]
    pub async fn run(&self) -> Result<(), UpdateError<D, I>> {
        let dns_ip = self
            .provider
            .current_content()
            .await
            .map_err(UpdateError::Provider)?;

        let public_ip = self
            .resolver
            .public_ip()
            .await
            .map_err(UpdateError::Resolver)?;

        if dns_ip == public_ip {
            info!(ip = %public_ip, "dns record is up to date");
            return Ok(());
        }

        self.provider
            .update_record(&public_ip)
            .await
            .map_err(UpdateError::Provider)?;
        info!(old = %dns_ip, new = %public_ip, "dns record updated");

        // The record is already written; a failed notification must not fail
        // the run.
        if let Err(e) = self.notifier.notify(NOTIFICATION_BODY).await {
            error!("failed to send change notification: {}", e);
        }

        Ok(())
    }
}

pub enum UpdateError<D: Provider, I: Source> {
    Provider(D::Error),
    Resolver(I::Error),
}

impl<D: Provider, I: Source> Display for UpdateError<D, I> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            UpdateError::Provider(e) => Display::fmt(e, f),
            UpdateError::Resolver(e) => Display::fmt(e, f),
        }
    }
}

impl<D: Provider, I: Source> Debug for UpdateError<D, I> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            UpdateError::Provider(e) => f.debug_tuple("Provider").field(e).finish(),
            UpdateError::Resolver(e) => f.debug_tuple("Resolver").field(e).finish(),
        }
    }
}

impl<D: Provider, I: Source> std::error::Error for UpdateError<D, I> {}
