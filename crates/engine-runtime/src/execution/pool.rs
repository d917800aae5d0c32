use crate::error::ScanError;
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};
use tokio::{
    sync::{Mutex, mpsc},
    task::JoinHandle,
};
use tracing::{Instrument, debug};

/// Messages carried by the task queue.
#[derive(Debug)]
pub enum PoolMsg<T> {
    /// A real unit of work.
    Run(T),
    /// Closes the queue. Must be enqueued after every `Run`.
    Stop,
}

/// Work executed by each pool worker for every dequeued task.
#[async_trait]
pub trait TaskHandler<T>: Send + Sync + 'static
where
    T: Send + 'static,
{
    type Output: Send + 'static;

    /// `worker_id` identifies the worker for log correlation only.
    async fn handle(&self, worker_id: usize, task: T) -> Self::Output;
}

/// Fixed set of workers draining one bounded FIFO queue.
///
/// The owner calls [`run`](Self::run), enqueues every task, then
/// [`stop`](Self::stop), then [`wait`](Self::wait). The worker that
/// dequeues the stop message closes the queue; the others exit once it is
/// drained. Since the owner is the only producer, program order alone puts
/// the stop message behind every real task.
pub struct WorkerPool<T, H>
where
    T: Send + Debug + 'static,
    H: TaskHandler<T>,
{
    worker_count: usize,
    handler: Arc<H>,
    tx: mpsc::Sender<PoolMsg<T>>,
    // Handed to the workers by `run`, so the channel closes once they all exit.
    rx: Option<Arc<Mutex<mpsc::Receiver<PoolMsg<T>>>>>,
    workers: Vec<JoinHandle<Vec<H::Output>>>,
}

impl<T, H> WorkerPool<T, H>
where
    T: Send + Debug + 'static,
    H: TaskHandler<T>,
{
    /// `queue_capacity` bounds the number of waiting tasks; `enqueue` blocks
    /// beyond it.
    pub fn new(worker_count: usize, queue_capacity: usize, handler: H) -> Self {
        let (tx, rx) = mpsc::channel(queue_capacity.max(1));
        Self {
            worker_count: worker_count.max(1),
            handler: Arc::new(handler),
            tx,
            rx: Some(Arc::new(Mutex::new(rx))),
            workers: Vec::new(),
        }
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Spawns the workers inside the caller's span. Only the first call has
    /// any effect.
    pub fn run(&mut self) {
        let Some(rx) = self.rx.take() else {
            return;
        };

        for id in 0..self.worker_count {
            let rx = rx.clone();
            let handler = self.handler.clone();
            let worker = worker_loop(id, rx, handler).in_current_span();
            self.workers.push(tokio::spawn(worker));
        }
    }

    /// Adds a task, waiting for room if the queue is full.
    pub async fn enqueue(&self, task: T) -> Result<(), ScanError> {
        debug!(?task, "Adding task");
        self.tx
            .send(PoolMsg::Run(task))
            .await
            .map_err(|_| ScanError::QueueClosed)
    }

    /// Enqueues the stop message.
    pub async fn stop(&self) -> Result<(), ScanError> {
        debug!("Adding stop task");
        self.tx
            .send(PoolMsg::Stop)
            .await
            .map_err(|_| ScanError::QueueClosed)
    }

    /// Waits for every worker to exit and returns all task outputs, in no
    /// particular order.
    pub async fn wait(self) -> Result<Vec<H::Output>, ScanError> {
        let Self { tx, workers, .. } = self;
        drop(tx);

        let mut outputs = Vec::new();
        for handle in workers {
            outputs.extend(handle.await?);
        }
        Ok(outputs)
    }
}

async fn worker_loop<T, H>(
    id: usize,
    rx: Arc<Mutex<mpsc::Receiver<PoolMsg<T>>>>,
    handler: Arc<H>,
) -> Vec<H::Output>
where
    T: Send + Debug + 'static,
    H: TaskHandler<T>,
{
    debug!(worker = id, "Worker is now active");
    let mut outputs = Vec::new();

    loop {
        let task = {
            let mut rx = rx.lock().await;
            match rx.recv().await {
                Some(PoolMsg::Run(task)) => task,
                Some(PoolMsg::Stop) => {
                    debug!(worker = id, "Stop received, closing task queue");
                    rx.close();
                    continue;
                }
                None => break,
            }
        };

        debug!(worker = id, ?task, "Running task");
        outputs.push(handler.handle(id, task).await);
    }

    debug!(worker = id, "Worker is exiting");
    outputs
}
