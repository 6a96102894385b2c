//! Defines Kinetic Runtime task runner.
use std::future::Future;

use parking_lot::Mutex;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::sync::OnceCell;
use tokio::task::JoinHandle;

use crate::errors::{Error, RuntimeError, Unknown};

/// Represents the result of a TaskResult.
/// A task may return either () or Result<(), Error> for flexibility which
/// will be converted to TaskResult sent to the runtime.
pub enum TaskResult {
    Ok,
    Err(Error),
}

/// Represents a handler for a spawned task.
pub type TaskHandler = JoinHandle<Result<(), Error>>;

type TaskChannel = Mutex<Option<UnboundedReceiver<UnboundedReceiver<TaskResult>>>>;

/// Globally accessible runtime transmitter(TX)/receiver(RX) (not initialised yet)
pub static RUNTIME_TX: OnceCell<Mutex<Option<UnboundedSender<UnboundedReceiver<TaskResult>>>>> =
    OnceCell::const_new();
pub static RUNTIME_RX: OnceCell<TaskChannel> = OnceCell::const_new();

impl From<Result<(), Error>> for TaskResult {
    fn from(result: Result<(), Error>) -> Self {
        match result {
            Ok(_) => TaskResult::Ok,
            Err(e) => TaskResult::Err(e),
        }
    }
}

impl From<()> for TaskResult {
    fn from(_: ()) -> Self {
        TaskResult::Ok
    }
}

/// Creates the runtime task channel if not done yet.
///
/// This is called by `#[kinetic::runtime]` before running the user code.
pub async fn init_task_channel() {
    RUNTIME_RX
        .get_or_init(|| async {
            let (tx, rx) = tokio::sync::mpsc::unbounded_channel::<UnboundedReceiver<TaskResult>>();

            RUNTIME_TX
                .get_or_init(|| async { Mutex::new(Some(tx)) })
                .await;

            Mutex::new(Some(rx))
        })
        .await;
}

/// Waits for every task spawned through [`run`] (including the ones spawned while waiting) to be done.
///
/// This is called by `#[kinetic::runtime]` after running the user code.
pub async fn wait_all_tasks() {
    let receiver = match RUNTIME_RX.get() {
        None => return,
        Some(cell) => cell.lock().take(),
    };

    if let Some(mut receiver) = receiver {
        while !receiver.is_empty() {
            // We receive the task specific receiver...
            if let Some(mut task_receiver) = receiver.recv().await {
                // ...and the task result through that new receiver.
                if let Some(TaskResult::Err(err)) = task_receiver.recv().await {
                    log::error!("Task failed: {}", err);
                }
            }
        }

        // Give the receiver back for a potential next runtime (tests run many in a row).
        if let Some(cell) = RUNTIME_RX.get() {
            *cell.lock() = Some(receiver);
        }
    }
}

/// Runs a given future as a Tokio task while ensuring the main function (marked by `#[kinetic::runtime]`)
/// will not finish before all tasks running are done.
/// This is done by using a globally accessible channel to communicate the handlers to be waited by the
/// runtime.
///
/// # Parameters
/// * `future`: A future that implements `Future<Output = ()>`, `Send`, and has a `'static` lifetime.
///
/// # Errors
/// Returns a [`RuntimeError`] if the code does not run inside `#[kinetic::runtime]`, or an
/// `Unknown` error if sending the task handle fails.
///
/// # Example
/// ```
/// use kinetic::utils::task;
/// # use kinetic::utils; // `#[kinetic::runtime]` resolves to `crate::utils` inside kinetic's own doctests.
///
/// #[kinetic::runtime]
/// async fn main() {
///     task::run(async move {
///         // whatever
///     }).unwrap();
/// }
/// ```
pub fn run<F, T>(future: F) -> Result<TaskHandler, Error>
where
    F: Future<Output = T> + Send + 'static,
    T: Into<TaskResult> + Send + 'static,
{
    let cell = RUNTIME_TX.get().ok_or(RuntimeError)?;
    let runtime = tokio::runtime::Handle::try_current().map_err(|_| RuntimeError)?;

    // Create a transmitter(tx)/receiver(rx) unique to this task.
    let (task_tx, task_rx) = tokio::sync::mpsc::unbounded_channel();

    // --
    // Send the receiver(rx) side of the task-channel to the runtime.
    {
        let mut lock = cell.lock();
        let runtime_tx = lock.as_mut().ok_or(RuntimeError)?;
        runtime_tx.send(task_rx).map_err(|err| Unknown {
            info: err.to_string(),
        })?;
    }

    // --
    // Create a task to run our future: note how we capture the tx...
    let handler = runtime.spawn(async move {
        // ...to send the result of the future through that channel.
        let result = future.await.into();
        task_tx.send(result).map_err(|err| Unknown {
            info: err.to_string(),
        })?;
        Ok(())
    });

    Ok(handler)
}

#[macro_export]
macro_rules! pause {
    ($ms:expr) => {
        $crate::utils::tokio::time::sleep($crate::utils::tokio::time::Duration::from_millis(
            $ms as u64,
        ))
        .await
    };
}

#[macro_export]
macro_rules! pause_sync {
    ($ms:expr) => {
        std::thread::sleep(std::time::Duration::from_millis($ms as u64))
    };
}
