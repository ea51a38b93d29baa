use std::io;

use log::{info, warn};

use super::crf_context::CrfContext;
use super::feature_gen::FeatureGenerator;
use super::params::{LineSearchAlgorithm, TrainerParams};
use crate::dataset::Instance;

const DEFAULT_NUM_MEMORIES: usize = 6;

/// Fit feature weights by minimising the regularised negative log-likelihood
///
/// L2 is added to the objective here; L1 is handled by the optimiser's
/// orthant-wise mode. The final weights are stored in `fgen`.
pub(super) fn train(
    instances: &[Instance],
    num_labels: usize,
    fgen: &mut FeatureGenerator,
    params: &TrainerParams,
    verbose: bool,
) -> io::Result<()> {
    let num_features = fgen.num_features();
    let max_items = instances.iter().map(Instance::len).max().unwrap_or(0);
    let c2 = params.c2();

    let mut weights = vec![0.0; num_features];
    let mut last_good = weights.clone();
    let mut ctx = CrfContext::new(num_labels, max_items);

    let evaluate = |x: &[f64], gx: &mut [f64]| -> anyhow::Result<f64> {
        fgen.set_weights(x);
        ctx.set_transitions(fgen);
        gx.fill(0.0);

        let mut loss = 0.0;
        for inst in instances {
            let len = inst.len();
            ctx.set_states(inst, fgen);
            let log_z = ctx.forward(len);
            ctx.backward(len);
            loss -= ctx.log_likelihood(inst, log_z) * inst.weight;
            ctx.accumulate_gradient(inst, fgen, log_z, inst.weight, gx);
        }

        if c2 > 0.0 {
            for (g, &w) in gx.iter_mut().zip(x) {
                *g += 2.0 * c2 * w;
                loss += c2 * w * w;
            }
        }
        Ok(loss)
    };

    let progress = |prgr: &liblbfgs::Progress| -> bool {
        last_good.copy_from_slice(prgr.x);
        if verbose {
            let active = prgr.x.iter().filter(|&&w| w != 0.0).count();
            info!(
                "***** Iteration #{} *****\nLoss: {:.6}\nFeature norm: {:.6}\nError norm: {:.6}\nActive features: {}\nLine search trials: {}\nLine search step: {:.6}",
                prgr.niter, prgr.fx, prgr.xnorm, prgr.gnorm, active, prgr.ncall, prgr.step
            );
        }
        false
    };

    // liblbfgs has no setter for the number of corrections
    if params.num_memories() != DEFAULT_NUM_MEMORIES {
        warn!(
            "num_memories = {} is ignored; L-BFGS keeps {} corrections",
            params.num_memories(),
            DEFAULT_NUM_MEMORIES
        );
    }

    let mut lbfgs = liblbfgs::lbfgs()
        .with_max_iterations(params.max_iterations())
        .with_epsilon(params.epsilon())
        .with_fx_delta(params.delta(), params.period())
        .with_max_linesearch(params.max_linesearch());

    // OWL-QN only supports backtracking line search
    if params.c1() > 0.0 {
        lbfgs = lbfgs
            .with_linesearch_algorithm(LineSearchAlgorithm::BacktrackingStrongWolfe.as_str())
            .with_orthantwise(params.c1(), 0, num_features);
    } else {
        lbfgs = lbfgs.with_linesearch_algorithm(params.linesearch().as_str());
    }

    match lbfgs.minimize(&mut weights, evaluate, progress) {
        Ok(report) => {
            if verbose {
                info!("L-BFGS terminated with loss {:.6}", report.fx);
            }
        }
        Err(e) => {
            // CRFsuite keeps the last accepted iterate when the line search gives up
            warn!("L-BFGS stopped early: {:#}", e);
            weights.copy_from_slice(&last_good);
        }
    }

    fgen.set_weights(&weights);
    Ok(())
}
