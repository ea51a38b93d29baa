use super::feature_gen::FeatureGenerator;
use crate::dataset::Instance;

/// Scratch space for forward-backward over one linear-chain instance
///
/// All tables are row-major and in log space.
pub struct CrfContext {
    num_labels: usize,
    /// [t][label]
    state: Vec<f64>,
    /// [prev][label]
    trans: Vec<f64>,
    /// [t][label]
    alpha: Vec<f64>,
    /// [t][label]
    beta: Vec<f64>,
}

fn logsumexp(values: impl Iterator<Item = f64> + Clone) -> f64 {
    let max = values.clone().fold(f64::NEG_INFINITY, f64::max);
    if max.is_infinite() {
        return max;
    }
    max + values.map(|v| (v - max).exp()).sum::<f64>().ln()
}

impl CrfContext {
    pub fn new(num_labels: usize, max_items: usize) -> Self {
        Self {
            num_labels,
            state: vec![0.0; num_labels * max_items],
            trans: vec![0.0; num_labels * num_labels],
            alpha: vec![0.0; num_labels * max_items],
            beta: vec![0.0; num_labels * max_items],
        }
    }

    /// Load transition weights; they are shared by every instance
    pub fn set_transitions(&mut self, fgen: &FeatureGenerator) {
        self.trans.fill(0.0);
        for refs in &fgen.label_refs {
            for &fid in &refs.fids {
                let f = &fgen.features[fid as usize];
                self.trans[f.src as usize * self.num_labels + f.dst as usize] += f.weight;
            }
        }
    }

    /// Compute per-position label scores of `inst`
    pub fn set_states(&mut self, inst: &Instance, fgen: &FeatureGenerator) {
        let l = self.num_labels;
        self.state[..inst.len() * l].fill(0.0);
        for (t, item) in inst.items.iter().enumerate() {
            let row = &mut self.state[t * l..(t + 1) * l];
            for attr in item {
                let Some(refs) = fgen.attr_refs.get(attr.id as usize) else {
                    continue;
                };
                for &fid in &refs.fids {
                    let f = &fgen.features[fid as usize];
                    row[f.dst as usize] += f.weight * attr.value;
                }
            }
        }
    }

    /// Fill alpha and return the log partition function
    pub fn forward(&mut self, len: usize) -> f64 {
        let l = self.num_labels;
        self.alpha[..l].copy_from_slice(&self.state[..l]);
        for t in 1..len {
            for j in 0..l {
                let prev = &self.alpha[(t - 1) * l..t * l];
                let trans = &self.trans;
                let s = logsumexp((0..l).map(|i| prev[i] + trans[i * l + j]));
                self.alpha[t * l + j] = s + self.state[t * l + j];
            }
        }
        logsumexp(self.alpha[(len - 1) * l..len * l].iter().copied())
    }

    pub fn backward(&mut self, len: usize) {
        let l = self.num_labels;
        self.beta[(len - 1) * l..len * l].fill(0.0);
        for t in (0..len - 1).rev() {
            for i in 0..l {
                let next = &self.beta[(t + 1) * l..(t + 2) * l];
                let state = &self.state[(t + 1) * l..(t + 2) * l];
                let trans = &self.trans[i * l..(i + 1) * l];
                let s = logsumexp((0..l).map(|j| trans[j] + state[j] + next[j]));
                self.beta[t * l + i] = s;
            }
        }
    }

    /// Log-probability of the gold labels; needs `set_states` and `forward`
    pub fn log_likelihood(&self, inst: &Instance, log_z: f64) -> f64 {
        let l = self.num_labels;
        let mut score = 0.0;
        for (t, &y) in inst.labels.iter().enumerate() {
            score += self.state[t * l + y as usize];
            if t > 0 {
                score += self.trans[inst.labels[t - 1] as usize * l + y as usize];
            }
        }
        score - log_z
    }

    /// Add `scale * (expected - observed)` feature counts to `grad`
    ///
    /// Needs `set_states`, `forward` and `backward` to have run for `inst`.
    pub fn accumulate_gradient(
        &self,
        inst: &Instance,
        fgen: &FeatureGenerator,
        log_z: f64,
        scale: f64,
        grad: &mut [f64],
    ) {
        let l = self.num_labels;

        for (t, item) in inst.items.iter().enumerate() {
            let gold = inst.labels[t];
            for attr in item {
                let Some(refs) = fgen.attr_refs.get(attr.id as usize) else {
                    continue;
                };
                for &fid in &refs.fids {
                    let dst = fgen.features[fid as usize].dst;
                    let k = t * l + dst as usize;
                    let mut delta = (self.alpha[k] + self.beta[k] - log_z).exp();
                    if dst == gold {
                        delta -= 1.0;
                    }
                    grad[fid as usize] += scale * attr.value * delta;
                }
            }
        }

        for t in 1..inst.len() {
            let (gold_prev, gold) = (inst.labels[t - 1], inst.labels[t]);
            for (i, refs) in fgen.label_refs.iter().enumerate() {
                let a = self.alpha[(t - 1) * l + i];
                for &fid in &refs.fids {
                    let j = fgen.features[fid as usize].dst as usize;
                    let k = t * l + j;
                    let mut delta =
                        (a + self.trans[i * l + j] + self.state[k] + self.beta[k] - log_z).exp();
                    if gold_prev as usize == i && gold as usize == j {
                        delta -= 1.0;
                    }
                    grad[fid as usize] += scale * delta;
                }
            }
        }
    }
}
