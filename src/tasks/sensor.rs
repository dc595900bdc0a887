// MotionCue — Sensor Task
//
// `ThreadedSensor` turns any polled `Accelerometer` into a `SensorSource`.
// Each subscription runs its own sensor thread that reads the accelerometer
// once per sampling interval and pushes the reading into the subscriber's
// channel.  A thread ends when its stop flag is raised or when the receiving
// side hangs up, whichever it notices first.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crate::config::*;
use crate::events::SensorEvent;
use crate::sensor::{Accelerometer, SensorSource, SubscriptionHandle};

struct Subscription {
    handle: SubscriptionHandle,
    stop: Arc<AtomicBool>,
}

pub struct ThreadedSensor<A> {
    accelerometer: Arc<Mutex<A>>,
    interval: Duration,
    next_id: u64,
    current: Option<Subscription>,
}

impl<A> ThreadedSensor<A>
where
    A: Accelerometer + Send + 'static,
{
    pub fn new(accelerometer: A) -> Self {
        Self {
            accelerometer: Arc::new(Mutex::new(accelerometer)),
            interval: Duration::from_millis(SENSOR_SAMPLE_INTERVAL_MS),
            next_id: 0,
            current: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_subscribed(&self) -> bool {
        self.current.is_some()
    }

    fn stop_current(&mut self) {
        if let Some(sub) = self.current.take() {
            sub.stop.store(true, Ordering::SeqCst);
            log::info!("Sensor subscription #{} stopped", sub.handle.id());
        }
    }
}

impl<A> SensorSource for ThreadedSensor<A>
where
    A: Accelerometer + Send + 'static,
{
    fn set_sampling_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    fn subscribe(&mut self, sink: Sender<SensorEvent>) -> anyhow::Result<SubscriptionHandle> {
        // One live subscription at a time.
        self.stop_current();

        self.next_id += 1;
        let handle = SubscriptionHandle::new(self.next_id);
        let stop = Arc::new(AtomicBool::new(false));

        let accelerometer = Arc::clone(&self.accelerometer);
        let thread_stop = Arc::clone(&stop);
        let interval = self.interval;
        let mut builder = thread::Builder::new().name("sensor".into());
        if cfg!(target_os = "espidf") {
            builder = builder.stack_size(STACK_SENSOR);
        }
        builder.spawn(move || {
            sensor_task(accelerometer, sink, interval, thread_stop);
        })?;

        self.current = Some(Subscription { handle, stop });
        Ok(handle)
    }

    fn unsubscribe(&mut self, handle: SubscriptionHandle) {
        match &self.current {
            Some(sub) if sub.handle == handle => self.stop_current(),
            _ => log::debug!("Ignoring unsubscribe for stale handle #{}", handle.id()),
        }
    }
}

impl<A> Drop for ThreadedSensor<A> {
    fn drop(&mut self) {
        if let Some(sub) = self.current.take() {
            sub.stop.store(true, Ordering::SeqCst);
        }
    }
}

fn sensor_task<A: Accelerometer>(
    accelerometer: Arc<Mutex<A>>,
    sensor_tx: Sender<SensorEvent>,
    interval: Duration,
    stop: Arc<AtomicBool>,
) {
    log::info!("Sensor task started ({} ms)", interval.as_millis());

    loop {
        if stop.load(Ordering::SeqCst) {
            log::info!("Sensor task stopping");
            return;
        }

        let tick_start = Instant::now();

        let reading = {
            let mut accel = accelerometer.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            accel.read_acceleration()
        };

        match reading {
            Ok(sample) => {
                if sensor_tx.send(SensorEvent::motion(sample)).is_err() {
                    // Subscriber went away — nothing left to feed.
                    log::info!("Sensor channel closed — exiting sensor task");
                    return;
                }
            }
            Err(e) => {
                log::warn!("Accelerometer read error: {}", e);
            }
        }

        // Sleep for the remainder of the sampling interval.
        let elapsed = tick_start.elapsed();
        if elapsed < interval {
            thread::sleep(interval - elapsed);
        }
    }
}
