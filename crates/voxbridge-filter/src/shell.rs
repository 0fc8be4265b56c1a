//! Filter execution shell
//!
//! [`FilterShell`] drives one algorithm run against a host store through a
//! fixed sequence of states:
//!
//! ```text
//! Validating -> Resolving -> Running -> Finalizing -> Done
//!      \            \           \           \
//!       +------------+-----------+-----------+--> Failed { code, message }
//! ```
//!
//! - **Validating** checks the host layout and the algorithm parameters.
//!   Geometry is checked before any array is looked up.
//! - **Resolving** finds the concrete element kind of the input among the
//!   kinds the algorithm accepts.
//! - **Running** creates the output array, borrows input and output
//!   together and runs the algorithm straight into the output buffer.
//!   Errors and panics raised by the algorithm stop here.
//! - **Finalizing** replaces the input with the result in overwrite mode.
//!
//! Every transition is logged at `debug` level and kept in
//! [`FilterShell::states`].

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::panic::{self, AssertUnwindSafe};

use log::{debug, warn};
use voxbridge_core::{
    ArrayHandle, DataKind, Element, ImageGeometry, ImageView, ImageViewMut, OutputBinder,
    OutputStage, SliceVisitor, resolve, resolve_as_mut,
};
use voxbridge_store::{DataArrayPath, DataStore, StoreError};

use crate::algorithm::VolumeAlgorithm;
use crate::config::ShellConfig;
use crate::error::{AlgorithmError, FilterError, FilterResult};

/// State of a filter run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellState {
    Validating,
    Resolving,
    Running,
    Finalizing,
    Done,
    Failed { code: i32, message: String },
}

impl ShellState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ShellState::Done | ShellState::Failed { .. })
    }
}

impl fmt::Display for ShellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellState::Validating => write!(f, "validating"),
            ShellState::Resolving => write!(f, "resolving"),
            ShellState::Running => write!(f, "running"),
            ShellState::Finalizing => write!(f, "finalizing"),
            ShellState::Done => write!(f, "done"),
            ShellState::Failed { code, message } => write!(f, "failed ({code}): {message}"),
        }
    }
}

/// What a run would create, as reported by [`FilterShell::preflight`]
#[derive(Debug, Clone, PartialEq)]
pub struct OutputPlan {
    /// Where the result ends up
    pub path: DataArrayPath,
    /// Resolved input element kind
    pub input_kind: DataKind,
    /// Output element kind
    pub kind: DataKind,
    pub components: usize,
    pub tuples: usize,
}

/// Facts established by validation
#[derive(Debug, Clone, Copy)]
struct Checked {
    geometry: ImageGeometry,
    components: usize,
}

/// Runs volumetric algorithms against a host data store
#[derive(Debug, Clone)]
pub struct FilterShell {
    config: ShellConfig,
    states: Vec<ShellState>,
}

impl FilterShell {
    pub fn new(config: ShellConfig) -> Self {
        FilterShell {
            config,
            states: Vec::new(),
        }
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// States visited by the last run, in order
    pub fn states(&self) -> &[ShellState] {
        &self.states
    }

    /// Last state reached, if anything ran
    pub fn state(&self) -> Option<&ShellState> {
        self.states.last()
    }

    /// Validate and resolve without touching the store.
    pub fn preflight<S, A>(&mut self, store: &S, algorithm: &A) -> FilterResult<OutputPlan>
    where
        S: DataStore + ?Sized,
        A: VolumeAlgorithm,
    {
        self.states.clear();
        let result = self.plan(store, algorithm);
        self.finish(&result);
        result
    }

    /// Run `algorithm` on the configured input.
    ///
    /// On success the result array exists at
    /// [`ShellConfig::result_path`]. On failure the store holds no array
    /// created by this run, except when overwrite finalization fails after
    /// the input was already removed.
    pub fn execute<S, A>(&mut self, store: &mut S, algorithm: &mut A) -> FilterResult<()>
    where
        S: DataStore + ?Sized,
        A: VolumeAlgorithm,
    {
        self.states.clear();
        let result = self.run_all(store, algorithm);
        self.finish(&result);
        result
    }

    fn enter(&mut self, state: ShellState) {
        debug!("{}: {}", self.config.input, state);
        self.states.push(state);
    }

    fn finish<T>(&mut self, result: &FilterResult<T>) {
        match result {
            Ok(_) => self.enter(ShellState::Done),
            Err(e) => self.enter(ShellState::Failed {
                code: e.code(),
                message: e.message(),
            }),
        }
    }

    fn plan<S, A>(&mut self, store: &S, algorithm: &A) -> FilterResult<OutputPlan>
    where
        S: DataStore + ?Sized,
        A: VolumeAlgorithm,
    {
        self.enter(ShellState::Validating);
        let checked = self.validate(store, algorithm)?;

        self.enter(ShellState::Resolving);
        let (input_kind, kind) = self.resolve_kinds(store, algorithm)?;

        Ok(OutputPlan {
            path: self.config.result_path(),
            input_kind,
            kind,
            components: algorithm.output_components(checked.components),
            tuples: checked.geometry.voxel_count(),
        })
    }

    fn run_all<S, A>(&mut self, store: &mut S, algorithm: &mut A) -> FilterResult<()>
    where
        S: DataStore + ?Sized,
        A: VolumeAlgorithm,
    {
        self.enter(ShellState::Validating);
        let checked = self.validate(&*store, &*algorithm)?;

        self.enter(ShellState::Resolving);
        let (_, out_kind) = self.resolve_kinds(&*store, &*algorithm)?;

        self.enter(ShellState::Running);
        let input = self.config.input.clone();
        let target = self.config.working_path();
        let out_components = algorithm.output_components(checked.components);
        store
            .create_array(
                &target,
                out_kind,
                out_components,
                checked.geometry.voxel_count(),
            )
            .map_err(FilterError::StoreMutation)?;

        let run = run_algorithm(store, &input, &target, checked, out_components, algorithm);
        match run {
            Ok(written) => debug!("{}: wrote {} elements to {}", input, written, target),
            Err(e) => {
                if let Err(cleanup) = store.remove_array(&target) {
                    warn!("{}: could not remove output {}: {}", input, target, cleanup);
                }
                return Err(e);
            }
        }

        self.enter(ShellState::Finalizing);
        if !self.config.save_as_new_array {
            replace_input(store, &input, &target)?;
        }
        Ok(())
    }

    fn validate<S, A>(&self, store: &S, algorithm: &A) -> FilterResult<Checked>
    where
        S: DataStore + ?Sized,
        A: VolumeAlgorithm,
    {
        let input = &self.config.input;
        if !input.is_valid() {
            return Err(FilterError::InvalidParameter(format!(
                "input array path '{input}' is incomplete"
            )));
        }

        let geometry = match store.geometry(&input.container) {
            Ok(Some(g)) => g,
            Ok(None) => return Err(FilterError::MissingGeometry(input.container.clone())),
            Err(_) => return Err(FilterError::MissingContainer(input.container.clone())),
        };

        let matrix_tuples = store.matrix_tuple_count(input).map_err(|e| match e {
            StoreError::ContainerNotFound(c) => FilterError::MissingContainer(c),
            _ => FilterError::MissingMatrix {
                container: input.container.clone(),
                matrix: input.matrix.clone(),
            },
        })?;
        if matrix_tuples != geometry.voxel_count() {
            return Err(FilterError::TupleMismatch {
                path: input.clone(),
                expected: geometry.voxel_count(),
                actual: matrix_tuples,
            });
        }

        let handle = store
            .array(input)
            .map_err(|_| FilterError::MissingArray(input.clone()))?;

        let components = handle.component_count();
        let rule = algorithm.component_rule();
        if !rule.accepts(components) {
            return Err(FilterError::ComponentMismatch {
                path: input.clone(),
                expected: rule.to_string(),
                actual: components,
            });
        }
        if handle.tuple_count() != geometry.voxel_count() {
            return Err(FilterError::TupleMismatch {
                path: input.clone(),
                expected: geometry.voxel_count(),
                actual: handle.tuple_count(),
            });
        }

        if self.config.save_as_new_array {
            let name = &self.config.new_array_name;
            if name.is_empty() || name.contains('/') {
                return Err(FilterError::InvalidOutputName(name.clone()));
            }
        } else if self.config.temp_suffix.is_empty() || self.config.temp_suffix.contains('/') {
            return Err(FilterError::InvalidParameter(format!(
                "temporary suffix '{}' is not usable",
                self.config.temp_suffix
            )));
        }
        let target = self.config.working_path();
        if store.contains_array(&target) {
            return Err(FilterError::OutputExists(target));
        }

        algorithm
            .validate()
            .map_err(|e| FilterError::InvalidParameter(e.to_string()))?;

        Ok(Checked {
            geometry,
            components,
        })
    }

    fn resolve_kinds<S, A>(&self, store: &S, algorithm: &A) -> FilterResult<(DataKind, DataKind)>
    where
        S: DataStore + ?Sized,
        A: VolumeAlgorithm,
    {
        let input = &self.config.input;
        let handle = store
            .array(input)
            .map_err(|_| FilterError::MissingArray(input.clone()))?;
        let typed =
            resolve(handle, algorithm.accepted_kinds()).map_err(FilterError::UnsupportedType)?;
        let input_kind = typed.kind();
        let output_kind = typed.visit(OutputKind::<A>(PhantomData));
        debug!(
            "{}: {} resolved as {}, output {}",
            input,
            algorithm.name(),
            input_kind,
            output_kind
        );
        Ok((input_kind, output_kind))
    }
}

/// Remove the input and move the result into its place.
///
/// If the input cannot be removed the temporary result is dropped and the
/// store is back where it started. If the rename fails after the remove,
/// the result stays under its temporary name; there is no rollback.
fn replace_input<S>(store: &mut S, input: &DataArrayPath, temp: &DataArrayPath) -> FilterResult<()>
where
    S: DataStore + ?Sized,
{
    if let Err(e) = store.remove_array(input) {
        warn!("{}: could not remove original array: {}", input, e);
        if let Err(cleanup) = store.remove_array(temp) {
            warn!("{}: could not remove output {}: {}", input, temp, cleanup);
        }
        return Err(FilterError::StoreMutation(e));
    }
    if let Err(e) = store.rename_array(temp, &input.array) {
        warn!("{}: original removed but {} could not be renamed: {}", input, temp, e);
        return Err(FilterError::StoreMutation(e));
    }
    Ok(())
}

fn run_algorithm<S, A>(
    store: &mut S,
    input: &DataArrayPath,
    target: &DataArrayPath,
    checked: Checked,
    out_components: usize,
    algorithm: &mut A,
) -> FilterResult<usize>
where
    S: DataStore + ?Sized,
    A: VolumeAlgorithm,
{
    let accepted = algorithm.accepted_kinds();
    let (src, dst) = store
        .array_pair_mut(input, target)
        .map_err(FilterError::StoreMutation)?;
    let typed = resolve(src, accepted).map_err(FilterError::UnsupportedType)?;
    typed.visit(RunAlgorithm {
        algorithm,
        dst,
        geometry: checked.geometry,
        components: checked.components,
        out_components,
    })
}

/// Output element kind of `A` for the visited input type
struct OutputKind<A>(PhantomData<fn() -> A>);

impl<'a, A: VolumeAlgorithm> SliceVisitor<'a> for OutputKind<A> {
    type Output = DataKind;

    fn visit<T: Element>(self, _data: &'a [T]) -> DataKind {
        <A::Output<T> as Element>::KIND
    }
}

/// Builds the views for the visited input type and runs the algorithm
struct RunAlgorithm<'d, 'x, A> {
    algorithm: &'x mut A,
    dst: &'d mut dyn ArrayHandle,
    geometry: ImageGeometry,
    components: usize,
    out_components: usize,
}

impl<'a, A: VolumeAlgorithm> SliceVisitor<'a> for RunAlgorithm<'_, '_, A> {
    type Output = FilterResult<usize>;

    fn visit<T: Element>(self, data: &'a [T]) -> FilterResult<usize> {
        let input =
            ImageView::new(data, self.geometry, self.components).map_err(FilterError::Bridge)?;
        let out = resolve_as_mut::<A::Output<T>>(self.dst).map_err(FilterError::Bridge)?;
        let stage = VolumeStage {
            algorithm: self.algorithm,
            input,
            geometry: self.geometry,
            components: self.out_components,
        };
        let bound = OutputBinder::bind(stage, out).map_err(FilterError::Bridge)?;
        Ok(bound.execute()?)
    }
}

/// Algorithm run as the output stage of a bound host buffer
struct VolumeStage<'x, 'v, A, T: Element> {
    algorithm: &'x mut A,
    input: ImageView<'v, T>,
    geometry: ImageGeometry,
    components: usize,
}

impl<A: VolumeAlgorithm, T: Element> OutputStage<A::Output<T>> for VolumeStage<'_, '_, A, T> {
    type Error = AlgorithmError;

    fn expected_len(&self) -> usize {
        // Saturates so an oversized output fails the capacity check
        self.geometry.voxel_count().saturating_mul(self.components)
    }

    fn write_into(&mut self, dst: &mut [A::Output<T>]) -> Result<(), AlgorithmError> {
        let name = self.algorithm.name().to_string();
        let mut output = ImageViewMut::new(dst, self.geometry, self.components)
            .map_err(|e| AlgorithmError::new(name.as_str(), e.to_string()))?;
        let algorithm = &mut *self.algorithm;
        let input = &self.input;
        match panic::catch_unwind(AssertUnwindSafe(|| algorithm.run(input, &mut output))) {
            Ok(result) => result,
            Err(payload) => Err(AlgorithmError::new(name, panic_message(payload.as_ref()))),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {s}")
    } else {
        "panicked".to_string()
    }
}
