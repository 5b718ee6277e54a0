use burn::{
    nn::{
        loss::{MseLoss, Reduction},
        Linear, LinearConfig, LinearRecord,
    },
    prelude::*,
    record::{FullPrecisionSettings, NamedMpkBytesRecorder, Recorder},
};

use crate::domain::artifact::Architecture;
use crate::domain::error::ServiceError;

// #[derive(Config)] already brings Clone and Serialize/Deserialize.
// Defaults give the 12 → 64 → 32 → 1 network.
#[derive(Config, Debug)]
pub struct BurnedAreaRegressorConfig {
    #[config(default = 12)]
    pub input_size:    usize,
    #[config(default = 64)]
    pub hidden_size_1: usize,
    #[config(default = 32)]
    pub hidden_size_2: usize,
}

impl BurnedAreaRegressorConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> BurnedAreaRegressor<B> {
        BurnedAreaRegressor {
            hidden_1: LinearConfig::new(self.input_size, self.hidden_size_1).init(device),
            hidden_2: LinearConfig::new(self.hidden_size_1, self.hidden_size_2).init(device),
            output:   LinearConfig::new(self.hidden_size_2, 1).init(device),
        }
    }

    pub fn architecture(&self) -> Architecture {
        Architecture {
            input_size:    self.input_size,
            hidden_size_1: self.hidden_size_1,
            hidden_size_2: self.hidden_size_2,
        }
    }
}

impl From<Architecture> for BurnedAreaRegressorConfig {
    fn from(a: Architecture) -> Self {
        Self::new()
            .with_input_size(a.input_size)
            .with_hidden_size_1(a.hidden_size_1)
            .with_hidden_size_2(a.hidden_size_2)
    }
}

/// Two ReLU hidden layers and one linear output unit.
#[derive(Module, Debug)]
pub struct BurnedAreaRegressor<B: Backend> {
    pub hidden_1: Linear<B>,
    pub hidden_2: Linear<B>,
    pub output:   Linear<B>,
}

impl<B: Backend> BurnedAreaRegressor<B> {
    /// features: [batch, 12] → predicted area: [batch, 1]
    pub fn forward(&self, features: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = burn::tensor::activation::relu(self.hidden_1.forward(features));
        let x = burn::tensor::activation::relu(self.hidden_2.forward(x));
        self.output.forward(x)
    }

    /// Mean squared error against `targets` ([batch, 1]).
    pub fn forward_loss(&self, features: Tensor<B, 2>, targets: Tensor<B, 2>) -> (Tensor<B, 1>, Tensor<B, 2>) {
        let predictions = self.forward(features);
        let loss = MseLoss::new().forward(predictions.clone(), targets, Reduction::Mean);
        (loss, predictions)
    }

    /// Serialize all parameters at full precision.
    pub fn to_bytes(&self) -> crate::domain::error::Result<Vec<u8>> {
        let recorder = NamedMpkBytesRecorder::<FullPrecisionSettings>::default();
        Recorder::<B>::record(&recorder, self.clone().into_record(), ())
            .map_err(|e| ServiceError::Storage(format!("cannot serialize weights: {e:?}")))
    }

    /// Replace this model's parameters with ones produced by `to_bytes`.
    /// Every tensor in `bytes` must have the shape of the matching tensor in `self`.
    pub fn load_bytes(self, bytes: Vec<u8>, device: &B::Device) -> crate::domain::error::Result<Self> {
        let recorder = NamedMpkBytesRecorder::<FullPrecisionSettings>::default();
        let record: BurnedAreaRegressorRecord<B> = Recorder::<B>::load(&recorder, bytes, device)
            .map_err(|e| ServiceError::Storage(format!("cannot deserialize weights: {e:?}")))?;

        check_layer("hidden_1", &self.hidden_1, &record.hidden_1)?;
        check_layer("hidden_2", &self.hidden_2, &record.hidden_2)?;
        check_layer("output", &self.output, &record.output)?;
        Ok(self.load_record(record))
    }
}

// load_record copies tensors as-is, so a mismatch would only surface in forward
fn check_layer<B: Backend>(
    name:     &str,
    expected: &Linear<B>,
    found:    &LinearRecord<B>,
) -> crate::domain::error::Result<()> {
    let want_weight = expected.weight.dims();
    let got_weight  = found.weight.dims();
    let want_bias   = expected.bias.as_ref().map(|b| b.dims());
    let got_bias    = found.bias.as_ref().map(|b| b.dims());

    if want_weight != got_weight || want_bias != got_bias {
        return Err(ServiceError::Storage(format!(
            "layer '{name}' has weight {got_weight:?} / bias {got_bias:?}, \
             architecture expects {want_weight:?} / {want_bias:?}"
        )));
    }
    Ok(())
}
