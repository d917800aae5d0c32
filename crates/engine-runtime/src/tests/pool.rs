#[cfg(test)]
mod tests {
    use crate::{
        error::ScanError,
        execution::pool::{TaskHandler, WorkerPool},
    };
    use async_trait::async_trait;
    use std::{
        collections::HashSet,
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
        time::Duration,
    };

    // Records every invocation and echoes back (worker id, task).
    struct RecordingHandler {
        calls: Arc<AtomicUsize>,
        delay: Duration,
    }

    impl RecordingHandler {
        fn new(delay: Duration) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    calls: calls.clone(),
                    delay,
                },
                calls,
            )
        }
    }

    #[async_trait]
    impl TaskHandler<usize> for RecordingHandler {
        type Output = (usize, usize);

        async fn handle(&self, worker_id: usize, task: usize) -> (usize, usize) {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            (worker_id, task)
        }
    }

    struct PanickingHandler;

    #[async_trait]
    impl TaskHandler<usize> for PanickingHandler {
        type Output = ();

        async fn handle(&self, _worker_id: usize, task: usize) {
            panic!("handler failed on task {task}");
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_every_task_runs_exactly_once() {
        let (handler, calls) = RecordingHandler::new(Duration::from_millis(2));
        let mut pool = WorkerPool::new(3, 3, handler);
        pool.run();

        for task in 0..25 {
            pool.enqueue(task).await.unwrap();
        }
        pool.stop().await.unwrap();

        let outputs = pool.wait().await.unwrap();
        assert_eq!(outputs.len(), 25);
        assert_eq!(calls.load(Ordering::SeqCst), 25);

        let tasks: HashSet<usize> = outputs.iter().map(|(_, task)| *task).collect();
        assert_eq!(tasks, (0..25).collect::<HashSet<_>>());
        assert!(outputs.iter().all(|(worker, _)| *worker < 3));
    }

    #[tokio::test]
    async fn test_stop_without_tasks() {
        let (handler, calls) = RecordingHandler::new(Duration::ZERO);
        let mut pool = WorkerPool::new(4, 4, handler);
        pool.run();
        pool.stop().await.unwrap();

        let outputs = pool.wait().await.unwrap();
        assert!(outputs.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_enqueue_after_stop_is_rejected() {
        let (handler, _calls) = RecordingHandler::new(Duration::ZERO);
        let mut pool = WorkerPool::new(2, 2, handler);
        pool.run();
        pool.stop().await.unwrap();

        // Let a worker pick up the stop message and close the queue.
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(matches!(pool.enqueue(1).await, Err(ScanError::QueueClosed)));
        assert!(pool.wait().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_full_queue_blocks_producer() {
        let (handler, _calls) = RecordingHandler::new(Duration::ZERO);
        // Workers not started: nothing drains the queue.
        let pool = WorkerPool::new(1, 2, handler);

        pool.enqueue(1).await.unwrap();
        pool.enqueue(2).await.unwrap();
        let third = pool.enqueue(3);
        let blocked = tokio::time::timeout(Duration::from_millis(50), third).await;
        assert!(blocked.is_err(), "third enqueue should wait for room");
    }

    #[tokio::test]
    async fn test_dead_workers_unblock_producer() {
        let mut pool = WorkerPool::new(2, 2, PanickingHandler);
        pool.run();

        let produce = async {
            for task in 0..10 {
                pool.enqueue(task).await?;
            }
            pool.stop().await
        };
        let produced = tokio::time::timeout(Duration::from_secs(2), produce)
            .await
            .expect("producer must not hang once every worker is gone");
        assert!(matches!(produced, Err(ScanError::QueueClosed)));

        assert!(matches!(pool.wait().await, Err(ScanError::TaskJoin(_))));
    }
}
