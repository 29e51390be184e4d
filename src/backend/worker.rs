use std::{
    sync::mpsc::{self, Receiver, RecvTimeoutError, Sender},
    thread::{self, JoinHandle},
    time::Duration,
};

use crate::{
    infra::error::AppError,
    usecases::requests::{
        self, ApiCompletion, ApiRequest, ClientApi, DispatchError, RequestDispatcher,
    },
};

const REQUEST_WORKER_SHUTDOWN_FAILED: &str = "BACKEND_REQUEST_WORKER_SHUTDOWN_FAILED";
const REQUEST_WORKER_DETACHED: &str = "BACKEND_REQUEST_WORKER_DETACHED";

/// How long shutdown waits for an in-flight request before leaving it behind.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

/// Single background thread that runs requests one at a time, in the order
/// they were dispatched, and reports each result on the completion channel.
#[derive(Debug)]
pub struct RequestWorker {
    request_tx: Option<Sender<ApiRequest>>,
    worker: Option<JoinHandle<()>>,
    /// Disconnects when the worker thread exits, panics included.
    exited_rx: Receiver<()>,
}

impl RequestWorker {
    pub fn start<A>(api: A, completion_tx: Sender<ApiCompletion>) -> Result<Self, AppError>
    where
        A: ClientApi + Send + 'static,
    {
        let (request_tx, request_rx) = mpsc::channel::<ApiRequest>();
        let (exited_tx, exited_rx) = mpsc::channel::<()>();
        let worker = thread::Builder::new()
            .name("carechat-requests".to_owned())
            .spawn(move || {
                let _exited = exited_tx;
                run_worker(api, request_rx, completion_tx);
            })
            .map_err(AppError::WorkerStart)?;

        Ok(Self {
            request_tx: Some(request_tx),
            worker: Some(worker),
            exited_rx,
        })
    }
}

impl RequestDispatcher for RequestWorker {
    fn dispatch(&mut self, request: ApiRequest) -> Result<(), DispatchError> {
        match &self.request_tx {
            Some(request_tx) => request_tx
                .send(request)
                .map_err(|mpsc::SendError(request)| DispatchError(request)),
            None => Err(DispatchError(request)),
        }
    }
}

impl Drop for RequestWorker {
    fn drop(&mut self) {
        // Closing the queue ends the loop once the current request returns.
        drop(self.request_tx.take());

        let Some(worker) = self.worker.take() else {
            return;
        };

        if let Err(RecvTimeoutError::Timeout) = self.exited_rx.recv_timeout(SHUTDOWN_GRACE) {
            // The thread is abandoned and ends with the process.
            tracing::warn!(
                code = REQUEST_WORKER_DETACHED,
                grace_ms = SHUTDOWN_GRACE.as_millis() as u64,
                "request still in flight at shutdown; worker detached"
            );
            return;
        }

        if let Err(error) = worker.join() {
            tracing::warn!(
                code = REQUEST_WORKER_SHUTDOWN_FAILED,
                error = ?error,
                "request worker panicked on shutdown"
            );
        }
    }
}

fn run_worker<A: ClientApi>(
    api: A,
    request_rx: Receiver<ApiRequest>,
    completion_tx: Sender<ApiCompletion>,
) {
    for request in request_rx {
        let label = request.label();
        let completion = requests::execute(&api, request);
        if completion_tx.send(completion).is_err() {
            tracing::debug!(request = label, "completion receiver closed; stopping worker");
            break;
        }
    }
}
