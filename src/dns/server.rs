use crate::dns::handlers::Handler;
use crate::error::Error;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::net::UdpSocket;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub type SharedDnsServer = Arc<DnsServer>;

/// Largest UDP payload the responder will read. Plain DNS-over-UDP stays well below this.
const MAX_DATAGRAM_BYTES: usize = 4096;

/// The DNS responder lifecycle manager.
///
/// A `DnsServer` owns a fixed listen address and at most one live responder at a time.
/// [`present`][Self::present] binds the address and starts answering TXT queries for a
/// single `(fqdn, value)` pair; presenting again replaces the previous record outright,
/// and [`clean_up`][Self::clean_up] retracts it and releases the socket.
///
/// `present` and `clean_up` are intended to be driven by one logical caller at a time
/// (the HTTP control surface serializes them in practice). Concurrent calls cannot
/// corrupt the active slot, but their outcome ordering is unspecified.
pub struct DnsServer {
    listen_addr: SocketAddr,
    active: Mutex<Option<ActiveListener>>,
}

/// Handles to one running serve loop: a way to ask it to stop, and a way to observe that
/// it actually has.
struct ActiveListener {
    shutdown_tx: oneshot::Sender<()>,
    serve_task: JoinHandle<()>,
}

impl ActiveListener {
    /// Ask the serve loop to stop and wait for it to terminate, which also closes the
    /// UDP socket it owns.
    async fn stop(self) -> Result<(), Error> {
        // A failed send means the loop already exited; the join below reports how.
        let _ = self.shutdown_tx.send(());
        self.serve_task.await.map_err(Error::Shutdown)
    }
}

impl DnsServer {
    /// Validate `listen_addr` and construct an inactive manager.
    ///
    /// Nothing is bound until [`present`][Self::present] is called.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAddress`] if `listen_addr` is not a valid `host:port`.
    pub fn new(listen_addr: &str) -> Result<Self, Error> {
        let listen_addr = listen_addr.parse().map_err(|source| Error::InvalidAddress {
            addr: listen_addr.to_string(),
            source,
        })?;
        Ok(DnsServer {
            listen_addr,
            active: Mutex::new(None),
        })
    }

    /// Publish `value` as the single TXT record served for `fqdn`.
    ///
    /// Any previously presented record is fully retired first: the newest call always
    /// wins. The call blocks until the freshly spawned serve loop has confirmed it is
    /// accepting queries, so a caller may begin validation the moment this returns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bind`] if the UDP socket can't be bound, [`Error::Startup`] if
    /// the serve loop dies before confirming readiness, or the previous responder's
    /// teardown error. In every failure case the manager is left inactive.
    pub async fn present(&self, fqdn: &str, value: &str) -> Result<(), Error> {
        if let Some(previous) = self.take_active() {
            previous.stop().await?;
        }

        let socket = UdpSocket::bind(self.listen_addr)
            .await
            .map_err(|source| Error::Bind {
                addr: self.listen_addr,
                source,
            })?;
        let handler = Handler::new(fqdn, value);
        let (ready_tx, ready_rx) = oneshot::channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let serve_task = tokio::spawn(serve(socket, handler, ready_tx, shutdown_rx));

        // Startup handshake: the serve loop owns the ready sender and drops it if it
        // dies before entering the receive loop.
        if ready_rx.await.is_err() {
            let _ = serve_task.await;
            return Err(Error::Startup);
        }

        debug!(
            "dns responder for \"{fqdn}\" accepting queries on {}",
            self.listen_addr
        );
        self.put_active(ActiveListener {
            shutdown_tx,
            serve_task,
        });
        Ok(())
    }

    /// Retract the currently served record and release the UDP socket.
    ///
    /// Blocks until the serve loop has terminated, so the listen address is free to be
    /// bound again when this returns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotRunning`] if no responder is active, or [`Error::Shutdown`]
    /// if the serve loop terminated abnormally. The active slot is cleared either way.
    pub async fn clean_up(&self) -> Result<(), Error> {
        match self.take_active() {
            None => Err(Error::NotRunning),
            Some(listener) => listener.stop().await,
        }
    }

    /// Whether a responder currently occupies the active slot. Purely observational.
    pub fn is_up(&self) -> bool {
        self.lock_active().is_some()
    }

    fn take_active(&self) -> Option<ActiveListener> {
        self.lock_active().take()
    }

    fn put_active(&self, listener: ActiveListener) {
        *self.lock_active() = Some(listener);
    }

    fn lock_active(&self) -> MutexGuard<'_, Option<ActiveListener>> {
        // NB: unwrap is safe: the lock is only held for slot swaps, which can't panic.
        self.active.lock().unwrap()
    }
}

/// One responder's serve loop, run as a supervised background task.
///
/// The loop owns the socket for its whole life: falling out of the loop, whether from a
/// shutdown signal or because the manager dropped the listener handles, releases the
/// port for the next [`DnsServer::present`].
async fn serve(
    socket: UdpSocket,
    handler: Handler,
    ready_tx: oneshot::Sender<()>,
    mut shutdown_rx: oneshot::Receiver<()>,
) {
    // Confirm startup before the first socket await; the manager is blocked on this.
    let _ = ready_tx.send(());

    let mut buf = [0u8; MAX_DATAGRAM_BYTES];
    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown_rx => break,
            recv = socket.recv_from(&mut buf) => {
                let (len, peer) = match recv {
                    Ok(pair) => pair,
                    Err(err) => {
                        warn!("failed to receive dns query: {err}");
                        continue;
                    }
                };
                if let Some(response) = handler.handle_raw(&buf[..len]) {
                    if let Err(err) = socket.send_to(&response, peer).await {
                        warn!("failed to send dns response to {peer}: {err}");
                    }
                }
            }
        }
    }
}
