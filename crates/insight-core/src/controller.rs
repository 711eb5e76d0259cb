//! Session controller: owns the lifecycle of live assistant sessions.
//!
//! Per session: Empty → AwaitingInput ⇄ Processing, and any open state
//! → Closed via [`SessionController::close`].
//!
//! A turn appends the user prompt plus a pending entry, races the engine
//! call against the configured timeout, then swaps the pending entry for an
//! answer or a failure. Every turn carries a monotonic token; a result whose
//! token no longer matches the session's in-flight turn (or whose session
//! was closed meanwhile) is dropped.
//!
//! Single-threaded: share it as `Rc<SessionController>` and spawn `submit`
//! via `wasm_bindgen_futures::spawn_local`. No RefCell borrow is held
//! across the engine call.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use futures::future::{self, AbortHandle, AbortRegistration, Abortable, Either};
use insight_types::{
    InsightError, Result,
    analysis::AnalysisResult,
    brand::BrandId,
    entry::AssistantPayload,
    event::{SessionEvent, TurnStatus},
    session::{Session, SessionHandle},
};

use crate::event_bus::EventBus;
use crate::ports::{AnalysisEnginePort, AnalysisRequest, ClockPort};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Empty,
    AwaitingInput,
    Processing,
    Closed,
}

/// What happened to a submitted prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing was appended
    Ignored(IgnoreReason),
    Answered,
    /// The turn ended in a failure entry
    Failed,
    /// The engine result arrived for a closed session or stale turn
    Discarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    BlankPrompt,
    TurnInFlight,
}

struct LiveSession {
    session: Session,
    /// Bumped on every mutation of `session`
    revision: u64,
    in_flight: Option<InFlight>,
}

struct InFlight {
    turn: u64,
    abort: AbortHandle,
}

enum Slot {
    Open(LiveSession),
    Closed,
}

enum EngineOutcome {
    Answer(AnalysisResult),
    Failure(String),
    Cancelled,
}

pub struct SessionController {
    engine: RefCell<Rc<dyn AnalysisEnginePort>>,
    clock: Rc<dyn ClockPort>,
    event_bus: EventBus,
    timeout_ms: Cell<u64>,
    slots: RefCell<HashMap<SessionHandle, Slot>>,
    handle_counter: Cell<u64>,
    turn_counter: Cell<u64>,
}

impl SessionController {
    pub fn new(
        engine: Rc<dyn AnalysisEnginePort>,
        clock: Rc<dyn ClockPort>,
        event_bus: EventBus,
        timeout_ms: u64,
    ) -> Self {
        Self {
            engine: RefCell::new(engine),
            clock,
            event_bus,
            timeout_ms: Cell::new(timeout_ms),
            slots: RefCell::new(HashMap::new()),
            handle_counter: Cell::new(0),
            turn_counter: Cell::new(0),
        }
    }

    /// Swap the engine used for turns started from now on.
    pub fn replace_engine(&self, engine: Rc<dyn AnalysisEnginePort>) {
        log::info!("Analysis engine: {}", engine.engine_name());
        *self.engine.borrow_mut() = engine;
    }

    pub fn set_timeout_ms(&self, timeout_ms: u64) {
        self.timeout_ms.set(timeout_ms);
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms.get()
    }

    /// Open an empty session scoped to `brand`.
    pub fn open(&self, brand: Option<BrandId>) -> Result<SessionHandle> {
        let brand = brand.ok_or(InsightError::InvalidBrand)?;

        let handle = SessionHandle(self.handle_counter.get() + 1);
        self.handle_counter.set(handle.0);

        let session = Session::new(brand.clone(), self.clock.now());
        self.slots.borrow_mut().insert(
            handle,
            Slot::Open(LiveSession {
                session,
                revision: 0,
                in_flight: None,
            }),
        );

        log::info!("Session {} opened for {}", handle, brand);
        self.event_bus.emit(SessionEvent::Opened { handle, brand });
        Ok(handle)
    }

    /// Submit a prompt and drive the turn to completion.
    ///
    /// Blank prompts and prompts sent while a turn is in flight are
    /// ignored rather than queued. Engine errors and timeouts end the turn
    /// in a failure entry; they are not returned as `Err`.
    pub async fn submit(&self, handle: SessionHandle, prompt: &str) -> Result<SubmitOutcome> {
        let (request, turn, registration) = {
            let mut slots = self.slots.borrow_mut();
            let live = open_slot_mut(&mut slots, handle)?;

            if prompt.trim().is_empty() {
                log::debug!("Session {}: ignoring blank prompt", handle);
                return Ok(SubmitOutcome::Ignored(IgnoreReason::BlankPrompt));
            }
            if live.in_flight.is_some() || live.session.has_pending() {
                log::debug!("Session {}: turn in flight, ignoring prompt", handle);
                return Ok(SubmitOutcome::Ignored(IgnoreReason::TurnInFlight));
            }

            let request = AnalysisRequest {
                prompt: prompt.to_string(),
                brand: live.session.brand().clone(),
                prior_turns: live.session.entries().to_vec(),
            };
            live.session.begin_turn(prompt)?;
            live.revision += 1;

            let turn = self.turn_counter.get() + 1;
            self.turn_counter.set(turn);
            let (abort, registration) = AbortHandle::new_pair();
            live.in_flight = Some(InFlight { turn, abort });
            (request, turn, registration)
        };

        self.event_bus.emit(SessionEvent::TurnStarted { handle, turn });

        let outcome = self.call_engine(request, registration).await;
        Ok(self.reconcile(handle, turn, outcome))
    }

    async fn call_engine(
        &self,
        request: AnalysisRequest,
        registration: AbortRegistration,
    ) -> EngineOutcome {
        let engine = self.engine.borrow().clone();
        let timeout_ms = self.timeout_ms.get();

        let ask = Abortable::new(engine.ask(request), registration);
        let timeout = self.clock.sleep(timeout_ms);

        let outcome = match future::select(ask, timeout).await {
            Either::Left((Ok(Ok(result)), _)) => EngineOutcome::Answer(result),
            Either::Left((Ok(Err(e)), _)) => {
                log::warn!("Analysis engine {} failed: {}", engine.engine_name(), e);
                EngineOutcome::Failure(e.to_string())
            }
            Either::Left((Err(_aborted), _)) => EngineOutcome::Cancelled,
            Either::Right(((), _)) => {
                log::warn!("Analysis engine {} timed out", engine.engine_name());
                EngineOutcome::Failure(InsightError::Timeout(timeout_ms).to_string())
            }
        };
        outcome
    }

    fn reconcile(&self, handle: SessionHandle, turn: u64, outcome: EngineOutcome) -> SubmitOutcome {
        let mut slots = self.slots.borrow_mut();
        let live = match slots.get_mut(&handle) {
            Some(Slot::Open(live))
                if live.in_flight.as_ref().is_some_and(|f| f.turn == turn) =>
            {
                live
            }
            _ => {
                log::debug!("Session {}: discarding result of turn {}", handle, turn);
                self.event_bus.emit(SessionEvent::TurnDiscarded { handle, turn });
                return SubmitOutcome::Discarded;
            }
        };
        live.in_flight = None;

        let (payload, status) = match outcome {
            EngineOutcome::Answer(result) => {
                (AssistantPayload::Answer { result }, TurnStatus::Answered)
            }
            EngineOutcome::Failure(message) => {
                (AssistantPayload::Failure { message }, TurnStatus::Failed)
            }
            EngineOutcome::Cancelled => (
                AssistantPayload::Failure {
                    message: InsightError::Cancelled.to_string(),
                },
                TurnStatus::Failed,
            ),
        };

        if let Err(e) = live.session.resolve_turn(payload) {
            log::error!("Session {}: cannot resolve turn {}: {}", handle, turn, e);
            return SubmitOutcome::Discarded;
        }
        live.revision += 1;

        self.event_bus.emit(SessionEvent::TurnResolved { handle, turn, status });
        match status {
            TurnStatus::Answered => SubmitOutcome::Answered,
            TurnStatus::Failed => SubmitOutcome::Failed,
        }
    }

    /// Discard a session, cancelling its in-flight turn if any.
    pub fn close(&self, handle: SessionHandle) -> Result<()> {
        let mut slots = self.slots.borrow_mut();
        let slot = slots
            .get_mut(&handle)
            .ok_or(InsightError::UnknownSession(handle))?;

        match std::mem::replace(slot, Slot::Closed) {
            Slot::Closed => Err(InsightError::SessionClosed(handle)),
            Slot::Open(live) => {
                if let Some(in_flight) = live.in_flight {
                    log::info!("Session {}: cancelling turn {}", handle, in_flight.turn);
                    in_flight.abort.abort();
                }
                log::info!("Session {} closed", handle);
                self.event_bus.emit(SessionEvent::Closed { handle });
                Ok(())
            }
        }
    }

    /// Snapshot of the session's current entries
    pub fn session(&self, handle: SessionHandle) -> Result<Session> {
        self.with_open(handle, |live| live.session.clone())
    }

    pub fn revision(&self, handle: SessionHandle) -> Result<u64> {
        self.with_open(handle, |live| live.revision)
    }

    /// Reports `Closed` for a closed handle instead of failing.
    pub fn state(&self, handle: SessionHandle) -> Result<SessionState> {
        match self.slots.borrow().get(&handle) {
            None => Err(InsightError::UnknownSession(handle)),
            Some(Slot::Closed) => Ok(SessionState::Closed),
            Some(Slot::Open(live)) => Ok(if live.session.has_pending() {
                SessionState::Processing
            } else if live.session.is_empty() {
                SessionState::Empty
            } else {
                SessionState::AwaitingInput
            }),
        }
    }

    fn with_open<T>(&self, handle: SessionHandle, f: impl FnOnce(&LiveSession) -> T) -> Result<T> {
        match self.slots.borrow().get(&handle) {
            Some(Slot::Open(live)) => Ok(f(live)),
            Some(Slot::Closed) => Err(InsightError::SessionClosed(handle)),
            None => Err(InsightError::UnknownSession(handle)),
        }
    }
}

fn open_slot_mut(
    slots: &mut HashMap<SessionHandle, Slot>,
    handle: SessionHandle,
) -> Result<&mut LiveSession> {
    match slots.get_mut(&handle) {
        Some(Slot::Open(live)) => Ok(live),
        Some(Slot::Closed) => Err(InsightError::SessionClosed(handle)),
        None => Err(InsightError::UnknownSession(handle)),
    }
}
