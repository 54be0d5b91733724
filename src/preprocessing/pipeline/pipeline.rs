//! Sequential composition of transformers.
//!
//! A [`Chain`] fits its first stage, feeds that stage's output to the second
//! stage and fits it in turn. The fitted form, [`FittedChain`], is plain
//! serde data and applies both stages without refitting.

use crate::preprocessing::encoding::OneHotEncoder;
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::imputation::{CategoricalImputer, SimpleImputer};
use crate::preprocessing::scaling::StandardScaler;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use serde::{Deserialize, Serialize};

/// Two transformers run in sequence (unfitted).
#[derive(Clone, Debug)]
pub struct Chain<A, B> {
    first: A,
    second: B,
}

impl<A, B> Chain<A, B>
where
    A: Transformer,
    B: Transformer<Input = A::Output>,
{
    /// Chain `first` and `second`; `second` consumes the output of `first`.
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    /// The first stage.
    pub fn first(&self) -> &A {
        &self.first
    }

    /// The second stage.
    pub fn second(&self) -> &B {
        &self.second
    }
}

impl<A, B> Transformer for Chain<A, B>
where
    A: Transformer,
    B: Transformer<Input = A::Output>,
{
    type Input = A::Input;
    type Output = B::Output;
    type Fitted = FittedChain<A::Fitted, B::Fitted>;

    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PreprocessingError> {
        self.fit_transform(data).map(|(fitted, _)| fitted)
    }

    // Each stage is fitted on the output of the previous fitted stage, so the
    // intermediate result is reused rather than recomputed.
    fn fit_transform(
        &self,
        data: &Self::Input,
    ) -> Result<(Self::Fitted, Self::Output), PreprocessingError> {
        let (first, intermediate) = self.first.fit_transform(data)?;
        let (second, output) = self.second.fit_transform(&intermediate)?;
        Ok((FittedChain { first, second }, output))
    }
}

/// Extension methods available on every [`Transformer`].
pub trait TransformerExt: Transformer + Sized {
    /// Append `next` after this transformer.
    fn then<N>(self, next: N) -> Chain<Self, N>
    where
        N: Transformer<Input = Self::Output>,
    {
        Chain::new(self, next)
    }
}

impl<T: Transformer> TransformerExt for T {}

/// Fitted [`Chain`] ready for inference.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FittedChain<A, B> {
    first: A,
    second: B,
}

impl<A, B> FittedChain<A, B> {
    /// The fitted first stage.
    pub fn first(&self) -> &A {
        &self.first
    }

    /// The fitted second stage.
    pub fn second(&self) -> &B {
        &self.second
    }
}

impl<A, B> FittedTransformer for FittedChain<A, B>
where
    A: FittedTransformer,
    B: FittedTransformer<Input = A::Output>,
{
    type Input = A::Input;
    type Output = B::Output;

    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        let intermediate = self.first.transform(data)?;
        self.second.transform(&intermediate)
    }

    fn n_features_in(&self) -> usize {
        self.first.n_features_in()
    }

    fn n_features_out(&self) -> usize {
        self.second.n_features_out()
    }

    fn feature_names_out(&self, input_features: &[String]) -> Vec<String> {
        let intermediate = self.first.feature_names_out(input_features);
        self.second.feature_names_out(&intermediate)
    }
}

/// Median imputation followed by standard scaling.
pub type NumericPipeline = Chain<SimpleImputer, StandardScaler>;

/// Mode imputation, one-hot encoding, then scaling without centering.
pub type CategoricalPipeline = Chain<Chain<CategoricalImputer, OneHotEncoder>, StandardScaler>;

/// Fitted form of [`NumericPipeline`].
pub type FittedNumericPipeline = <NumericPipeline as Transformer>::Fitted;

/// Fitted form of [`CategoricalPipeline`].
pub type FittedCategoricalPipeline = <CategoricalPipeline as Transformer>::Fitted;
