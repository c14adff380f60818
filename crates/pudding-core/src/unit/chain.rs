use std::marker::PhantomData;

use log::debug;
use serde_json::Value;

use super::{Component, ComponentHandle, InputSource, Unit};
use crate::config::RunConfig;
use crate::model::Outcome;
use crate::schema::Schema;
use crate::store::SampleStore;
use crate::validation::Validator;

/// Marker para afirmar en tiempo de compilación que dos tipos son el mismo.
pub trait SameAs<T> {}
impl<T> SameAs<T> for T {}

/// Cadena tipada de unidades.
///
/// `then` sólo compila si la entrada de la nueva unidad es exactamente la
/// salida de la anterior:
///
/// ```ignore
/// let chain = Chain::new(&loader).then(&cleaner).then(&counter);
/// let stats: Outcome<WordStats> = chain.run(json!({"text": "..."}), &RunConfig::debug());
/// ```
pub struct Chain<'a, O: Schema> {
    first: &'a dyn ComponentHandle,
    rest: Vec<&'a dyn ComponentHandle>,
    _out: PhantomData<O>,
}

impl<'a, O: Schema> Chain<'a, O> {
    pub fn new<C, S, V>(first: &'a Unit<C, S, V>) -> Self
        where C: Component<Output = O>,
              S: SampleStore,
              V: Validator
    {
        let first: &'a dyn ComponentHandle = first;
        Self { first,
               rest: Vec::new(),
               _out: PhantomData }
    }

    /// Agrega una etapa, exigiendo `C::Input == O`.
    pub fn then<C, S, V>(mut self, next: &'a Unit<C, S, V>) -> Chain<'a, C::Output>
        where C: Component,
              C::Input: SameAs<O>,
              S: SampleStore,
              V: Validator
    {
        let next: &'a dyn ComponentHandle = next;
        self.rest.push(next);
        Chain { first: self.first,
                rest: self.rest,
                _out: PhantomData }
    }

    pub fn len(&self) -> usize {
        1 + self.rest.len()
    }

    fn stages(&self) -> impl Iterator<Item = &'a dyn ComponentHandle> + '_ {
        std::iter::once(self.first).chain(self.rest.iter().copied())
    }

    /// Nombres de las etapas en orden.
    pub fn names(&self) -> Vec<String> {
        self.stages().map(|s| s.descriptor().name).collect()
    }

    /// Ejecuta todas las etapas alimentando cada una con el outcome previo.
    /// Se detiene en el primer fallo; el último elemento es el de esa etapa.
    pub fn run_all<'s>(&self, source: impl Into<InputSource<'s>>, config: &RunConfig) -> Vec<Outcome<Value>> {
        let mut outcomes: Vec<Outcome<Value>> = Vec::with_capacity(self.len());
        let mut source: InputSource<'_> = source.into();
        for stage in self.stages() {
            let outcome = stage.run_erased(source, config);
            debug!("chain stage {} success={}", stage.descriptor().name, outcome.is_success());
            if !outcome.is_success() {
                outcomes.push(outcome);
                break;
            }
            source = InputSource::Outcome(outcome.clone());
            outcomes.push(outcome);
        }
        outcomes
    }

    /// Outcome final tipado con la salida de la última etapa. Si una etapa
    /// intermedia falla, se devuelve su error.
    pub fn run<'s>(&self, source: impl Into<InputSource<'s>>, config: &RunConfig) -> Outcome<O> {
        let mut last = self.first.run_erased(source.into(), config);
        for stage in &self.rest {
            if !last.is_success() {
                break;
            }
            last = stage.run_erased(InputSource::Outcome(last), config);
        }
        last.decode::<O>()
    }
}
