//! `Unit`: orquesta resolución de entrada, validación, transformación,
//! envoltura de la salida y persistencia opcional.
//!
//! La unidad no guarda estado mutable entre llamadas: todo lo que produce una
//! ejecución vive en la propia llamada a `run`, por lo que dos unidades
//! distintas pueden ejecutarse en paralelo desde el caller.
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use log::{error, info};
use serde_json::Value;

use super::state::StateTrace;
use super::{Component, ComponentHandle, Descriptor, InputSource, RunState};
use crate::config::RunConfig;
use crate::errors::{IdentifierError, StoreError, UnitError};
use crate::model::{Envelope, Outcome, Producer, RunMetadata};
use crate::schema::Schema;
use crate::store::{Direction, InMemorySampleStore, SampleId, SampleStore, UnitName};
use crate::validation::{StructuralValidator, Validator};

pub struct Unit<C, S = InMemorySampleStore, V = StructuralValidator>
    where C: Component,
          S: SampleStore,
          V: Validator
{
    component: C,
    name: UnitName,
    store: Arc<S>,
    validator: V,
}

impl<C: Component, S: SampleStore> Unit<C, S, StructuralValidator> {
    /// Falla si el nombre del componente no es un identificador de store
    /// válido.
    pub fn new(component: C, store: Arc<S>) -> Result<Self, IdentifierError> {
        let name = UnitName::new(component.name())?;
        Ok(Self { component,
                  name,
                  store,
                  validator: StructuralValidator::default() })
    }
}

impl<C, S, V> Unit<C, S, V>
    where C: Component,
          S: SampleStore,
          V: Validator
{
    pub fn with_validator<W: Validator>(self, validator: W) -> Unit<C, S, W> {
        Unit { component: self.component,
               name: self.name,
               store: self.store,
               validator }
    }

    pub fn component(&self) -> &C {
        &self.component
    }

    pub fn name(&self) -> &UnitName {
        &self.name
    }

    pub fn version(&self) -> &str {
        self.component.version()
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn producer(&self) -> Producer {
        Producer::new(self.name.as_str(), self.component.version())
    }

    /// Muestras persistidas de esta unidad, en orden cronológico.
    pub fn list_samples(&self, direction: Option<Direction>) -> Result<Vec<SampleId>, StoreError> {
        self.store.list(&self.name, direction)
    }

    /// Ejecuta la unidad. Nunca entra en pánico ni devuelve `Err`: todo fallo
    /// queda dentro del `Outcome`.
    pub fn run<'a>(&self, source: impl Into<InputSource<'a>>, config: &RunConfig) -> Outcome<C::Output> {
        let source = source.into();
        let started = Instant::now();
        let started_at = Utc::now();
        let source_kind = source.kind();
        let is_replay = matches!(source, InputSource::Replay);
        let execution_id = config.resolve_execution_id();

        let mut ctx = RunContext { trace: StateTrace::new(self.name.as_str()),
                                   execution_id,
                                   input: None,
                                   saved: Vec::new() };
        let result = self.execute(source, config, &mut ctx);

        let failed_at = match &result {
            Ok(_) => {
                ctx.trace.enter(RunState::Done);
                None
            }
            Err(_) => {
                let at = ctx.trace.current();
                ctx.trace.enter(RunState::Failed);
                Some(at)
            }
        };
        let duration = started.elapsed();
        let metadata = RunMetadata { unit: self.producer(),
                                     execution_id: ctx.execution_id,
                                     source_kind,
                                     is_replay,
                                     started_at,
                                     states: ctx.trace.into_states(),
                                     failed_at,
                                     input: ctx.input,
                                     saved: ctx.saved };

        match result {
            Ok(output) => {
                info!("{} finished in {:?} ({} -> {})",
                      self.name,
                      duration,
                      C::Input::NAME,
                      C::Output::NAME);
                Outcome::success(output, duration, metadata)
            }
            Err(err) => {
                error!("{} failed at {}: {}",
                       self.name,
                       failed_at.unwrap_or(RunState::Idle),
                       err);
                Outcome::failure(err, duration, metadata)
            }
        }
    }

    fn execute(&self,
               source: InputSource<'_>,
               config: &RunConfig,
               ctx: &mut RunContext<'_>)
               -> Result<Envelope<C::Output>, UnitError> {
        ctx.trace.enter(RunState::ResolvingInput);
        if config.is_debug() {
            info!("{}: using {} input", self.name, source.kind().as_str());
        }
        let resolved = self.resolve(source, config, &ctx.execution_id)?;

        ctx.trace.enter(RunState::Validating);
        let prepared = self.component.prepare_input(resolved.payload().clone());
        let typed: C::Input = self.validator
                                  .validate(&prepared)
                                  .map_err(|fields| UnitError::Validation { schema: C::Input::NAME.to_string(),
                                                                            fields })?;
        let input = resolved.restamped(prepared, C::Input::NAME);
        ctx.input = Some(input.clone());

        ctx.trace.enter(RunState::Processing);
        if config.save_input() {
            let id = self.store.save(&self.name, Direction::Input, &input)?;
            info!("{}: input saved as {}", self.name, id);
            ctx.saved.push(id);
        }
        let output = self.invoke(typed)?;

        ctx.trace.enter(RunState::WrappingOutput);
        let wrapped = input.wrap(output, C::Output::NAME, self.producer(), Some(ctx.execution_id.clone()));

        if config.save_output() {
            ctx.trace.enter(RunState::Persisting);
            let erased = wrapped.erase().map_err(|e| self.processing_error(format!("output not serializable: {e}")))?;
            let id = self.store.save(&self.name, Direction::Output, &erased)?;
            info!("{}: output saved as {}", self.name, id);
            ctx.saved.push(id);
        }
        Ok(wrapped)
    }

    fn resolve(&self,
               source: InputSource<'_>,
               config: &RunConfig,
               execution_id: &str)
               -> Result<Envelope<Value>, UnitError> {
        let envelope = match source {
            InputSource::Replay => self.store
                                       .latest(&self.name, Direction::Input)?
                                       .ok_or_else(|| StoreError::NotFound(format!("{}/{}", self.name, Direction::Input)))?,
            InputSource::Sample(id) => self.store.load(&id)?,
            InputSource::Outcome(outcome) => {
                let upstream = outcome.metadata().unit.name.clone();
                outcome.into_result()
                       .map_err(|e| UnitError::UpstreamFailed { unit: upstream,
                                                                message: e.to_string() })?
            }
            InputSource::Unit(handle) => {
                let upstream = handle.descriptor().name;
                handle.latest_output()?
                      .ok_or_else(|| StoreError::NotFound(format!("{}/{}", upstream, Direction::Output)))?
            }
            InputSource::Raw(raw) => {
                return Ok(Envelope::new(raw, C::Input::NAME, self.producer(), Some(execution_id.to_string())));
            }
        };

        let found = envelope.schema_name();
        let compatible = found == C::Input::NAME || self.component.accepts_schema(found);
        if !config.skips_compatibility_check() && !compatible {
            return Err(UnitError::SchemaMismatch { unit: self.name.to_string(),
                                                   expected: C::Input::NAME.to_string(),
                                                   found: found.to_string() });
        }
        Ok(envelope)
    }

    fn invoke(&self, input: C::Input) -> Result<C::Output, UnitError> {
        let output = match catch_unwind(AssertUnwindSafe(|| self.component.process(input))) {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => return Err(self.processing_error(e.0)),
            Err(panic) => return Err(self.processing_error(format!("panicked: {}", panic_message(&*panic)))),
        };
        output.check()
              .map_err(|message| self.processing_error(format!("invalid {} output: {message}", C::Output::NAME)))?;
        Ok(output)
    }

    fn processing_error(&self, message: String) -> UnitError {
        UnitError::Processing { unit: self.name.to_string(),
                                message }
    }
}

impl<C, S, V> ComponentHandle for Unit<C, S, V>
    where C: Component,
          S: SampleStore,
          V: Validator
{
    fn descriptor(&self) -> Descriptor {
        Descriptor { name: self.name.to_string(),
                     version: self.component.version().to_string(),
                     input_schema: C::Input::NAME.to_string(),
                     output_schema: C::Output::NAME.to_string() }
    }

    fn latest_output(&self) -> Result<Option<Envelope<Value>>, StoreError> {
        self.store.latest(&self.name, Direction::Output)
    }

    fn run_erased(&self, source: InputSource<'_>, config: &RunConfig) -> Outcome<Value> {
        self.run(source, config).erased()
    }
}

impl<C, S, V> std::fmt::Debug for Unit<C, S, V>
    where C: Component,
          S: SampleStore,
          V: Validator
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Unit")
         .field("name", &self.name)
         .field("version", &self.component.version())
         .field("input", &C::Input::NAME)
         .field("output", &C::Output::NAME)
         .finish()
    }
}

/// Estado local de una llamada a `run`.
struct RunContext<'a> {
    trace: StateTrace<'a>,
    execution_id: String,
    input: Option<Envelope<Value>>,
    saved: Vec<SampleId>,
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
