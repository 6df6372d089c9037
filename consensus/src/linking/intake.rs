//! Single consumer stage in front of the linker.
//!
//! The linker is not synchronized. Gossip readers, the local event creator
//! and the round computation stage all feed it through one channel, and a
//! single task applies their inputs in arrival order.

use std::sync::Arc;
use log::{debug, error, info};
use tokio::{
    sync::mpsc,
    task::JoinHandle,
};
use hashgraph_common::{
    config::VERSION,
    event::{EventWindow, PlatformEvent},
};
use super::{
    config::LinkerConfig,
    error::{LinkerError, LinkerResult},
    ConsensusLinker,
    LinkedEvent,
};

/// Input accepted by the intake stage.
#[derive(Debug)]
pub enum LinkerInput {
    Event(Arc<PlatformEvent>),
    Window(EventWindow),
    Clear,
}

/// Sending side of the intake stage. Cheap to clone, one per producer.
#[derive(Clone, Debug)]
pub struct LinkerHandle {
    sender: mpsc::Sender<LinkerInput>,
}

impl LinkerHandle {
    pub async fn submit_event<E: Into<Arc<PlatformEvent>>>(&self, event: E) -> LinkerResult<()> {
        self.send(LinkerInput::Event(event.into())).await
    }

    pub async fn update_window(&self, event_window: EventWindow) -> LinkerResult<()> {
        self.send(LinkerInput::Window(event_window)).await
    }

    pub async fn clear(&self) -> LinkerResult<()> {
        self.send(LinkerInput::Clear).await
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    async fn send(&self, input: LinkerInput) -> LinkerResult<()> {
        self.sender
            .send(input)
            .await
            .map_err(|_| LinkerError::IntakeClosed)
    }
}

/// Spawn the intake stage on the current tokio runtime.
///
/// Returns the handle to feed it, the receiver of linked events and the
/// task handle, which yields the linker back once every handle is dropped.
/// The stage also stops when the linked event receiver is dropped or when
/// it receives an older event window than the current one.
pub fn spawn_linker(
    linker: ConsensusLinker,
    config: &LinkerConfig,
) -> LinkerResult<(LinkerHandle, mpsc::Receiver<Arc<LinkedEvent>>, JoinHandle<ConsensusLinker>)> {
    config.validate()?;

    let (input_sender, input_receiver) = mpsc::channel(config.intake_capacity);
    let (output_sender, output_receiver) = mpsc::channel(config.intake_capacity);

    let handle = tokio::spawn(run_intake(linker, input_receiver, output_sender));
    Ok((LinkerHandle { sender: input_sender }, output_receiver, handle))
}

async fn run_intake(
    mut linker: ConsensusLinker,
    mut inputs: mpsc::Receiver<LinkerInput>,
    output: mpsc::Sender<Arc<LinkedEvent>>,
) -> ConsensusLinker {
    info!("Linker intake stage started (version {})", VERSION);

    while let Some(input) = inputs.recv().await {
        match input {
            LinkerInput::Event(event) => {
                let Some(linked) = linker.link_event(event) else {
                    continue;
                };
                if output.send(linked).await.is_err() {
                    debug!("Linked event receiver dropped, stopping linker intake stage");
                    break;
                }
            }
            LinkerInput::Window(event_window) => {
                if let Err(e) = linker.try_set_event_window(event_window) {
                    error!("Stopping linker intake stage: {}", e);
                    break;
                }
            }
            LinkerInput::Clear => linker.clear(),
        }
    }

    info!("Linker intake stage stopped, {:?}", linker.stats());
    linker
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashgraph_common::{config::ROUND_FIRST, event::testing::TestingEventBuilder};

    #[tokio::test]
    async fn test_events_flow_through_in_order() {
        let config = LinkerConfig::default();
        let (handle, mut linked, task) = spawn_linker(ConsensusLinker::new(&config).unwrap(), &config).unwrap();

        let genesis = TestingEventBuilder::new().set_birth_round(ROUND_FIRST).build();
        let child = TestingEventBuilder::new().set_self_parent(&genesis).build();

        handle.submit_event(genesis.clone()).await.unwrap();
        handle.submit_event(child.clone()).await.unwrap();

        let first = linked.recv().await.unwrap();
        let second = linked.recv().await.unwrap();
        assert_eq!(first.hash(), genesis.hash());
        assert_eq!(second.hash(), child.hash());
        assert_eq!(second.self_parent().unwrap().hash(), genesis.hash());

        drop(handle);
        let linker = task.await.unwrap();
        assert_eq!(linker.len(), 2);
    }

    #[tokio::test]
    async fn test_ancient_events_are_not_forwarded() {
        let config = LinkerConfig::default();
        let (handle, mut linked, task) = spawn_linker(ConsensusLinker::new(&config).unwrap(), &config).unwrap();

        handle.update_window(EventWindow::with_ancient_threshold(2)).await.unwrap();
        handle
            .submit_event(TestingEventBuilder::new().set_birth_round(2).build())
            .await
            .unwrap();
        let fresh = TestingEventBuilder::new().set_birth_round(3).build();
        handle.submit_event(fresh.clone()).await.unwrap();

        assert_eq!(linked.recv().await.unwrap().hash(), fresh.hash());

        drop(handle);
        let linker = task.await.unwrap();
        assert_eq!(linker.stats().ancient_events, 1);
        assert!(linked.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_window_regression_stops_the_stage() {
        let config = LinkerConfig::default();
        let (handle, _linked, task) = spawn_linker(ConsensusLinker::new(&config).unwrap(), &config).unwrap();

        handle.update_window(EventWindow::with_ancient_threshold(5)).await.unwrap();
        handle.update_window(EventWindow::with_ancient_threshold(1)).await.unwrap();

        let linker = task.await.unwrap();
        assert_eq!(linker.event_window().ancient_threshold(), 5);
        assert!(handle.is_closed());
        assert_eq!(
            handle.submit_event(TestingEventBuilder::new().build()).await,
            Err(LinkerError::IntakeClosed)
        );
    }

    #[tokio::test]
    async fn test_clear_through_handle() {
        let config = LinkerConfig::default();
        let (handle, mut linked, task) = spawn_linker(ConsensusLinker::new(&config).unwrap(), &config).unwrap();

        let genesis = TestingEventBuilder::new().build();
        handle.submit_event(genesis.clone()).await.unwrap();
        linked.recv().await.unwrap();

        handle.clear().await.unwrap();
        let child = TestingEventBuilder::new().set_self_parent(&genesis).build();
        handle.submit_event(child).await.unwrap();
        assert!(linked.recv().await.unwrap().self_parent().is_none());

        drop(handle);
        assert_eq!(task.await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected() {
        let config = LinkerConfig {
            intake_capacity: 0,
            ..LinkerConfig::default()
        };
        let result = spawn_linker(ConsensusLinker::default(), &config);
        assert!(matches!(result, Err(LinkerError::InvalidConfig(_))));
    }
}
