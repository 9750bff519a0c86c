use std::future::Future;

use chrono::{DateTime, Utc};
use rocket::tokio::{self, task::JoinHandle, time::Duration};

/// Work that runs when a deadline passes, unless aborted first.
#[derive(Debug)]
pub struct ExpiryTask<T> {
    handle: JoinHandle<T>,
}

impl<T> ExpiryTask<T>
where
    T: Send + 'static,
{
    /// Run `task` at `deadline`, or straight away if the deadline has passed.
    pub fn at<Fut>(deadline: DateTime<Utc>, task: Fut) -> Self
    where
        Fut: Future<Output = T> + Send + 'static,
    {
        let delay = until(deadline);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await
        });
        Self { handle }
    }

    /// Stop the task from running if it has not started yet.
    pub fn abort(&self) {
        self.handle.abort();
    }
}

/// Time left until `deadline`; zero once it has passed.
fn until(deadline: DateTime<Utc>) -> Duration {
    (deadline - Utc::now()).to_std().unwrap_or(Duration::ZERO)
}
