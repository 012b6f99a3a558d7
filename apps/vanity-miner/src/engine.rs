//! [apps/vanity-miner/src/engine.rs]
//!
//! Per-worker batched search loop: rekey, build a `STEP`-long chain of
//! consecutive `k*G` multiples in Jacobian coordinates, invert the
//! whole batch in one field inversion, then scan each resulting
//! compressed pubkey's HASH160 against the pattern table.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::SyncSender;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use vanity_core_math::prelude::*;
use vanity_core_pattern::table::PatternTable;

/// Number of consecutive `k*G` multiples batched per field inversion.
pub const STEP: usize = 3072;

/// A 52-byte hit record: 32-byte private key followed by 20-byte HASH160.
pub type HitRecord = [u8; 52];

pub struct WorkerEngine {
    worker_index: usize,
    pattern_table: Arc<PatternTable>,
    stop_flag: Arc<AtomicBool>,
    counter: Arc<AtomicU64>,
    hit_sender: SyncSender<HitRecord>,
}

impl WorkerEngine {
    pub fn new(
        worker_index: usize,
        pattern_table: Arc<PatternTable>,
        stop_flag: Arc<AtomicBool>,
        counter: Arc<AtomicU64>,
        hit_sender: SyncSender<HitRecord>,
    ) -> Self {
        Self { worker_index, pattern_table, stop_flag, counter, hit_sender }
    }

    /// Runs the search loop until the stop flag is set or the hit
    /// channel's receiver is gone.
    #[instrument(skip(self), fields(worker = self.worker_index))]
    pub fn run(&self) {
        let (offset_x, offset_y) = JacobianPoint::generator().to_affine_bytes().expect("generator is not infinity");
        let offset_x = FieldElement::from_bytes_be(&offset_x);
        let offset_y = FieldElement::from_bytes_be(&offset_y);

        let mut base_scalar = match self.rekey() {
            Some(scalar) => scalar,
            None => return,
        };
        let mut batch = vec![JacobianPoint::infinity(); STEP];
        batch[STEP - 1] = JacobianPoint::from_private(
            &SafePrivateKey::from_bytes(&base_scalar).expect("rekey produced a reduced scalar"),
        );

        let mut z_coords = vec![FieldElement::default(); STEP];
        let mut inverses = vec![FieldElement::default(); STEP];
        let mut scratch = vec![FieldElement::default(); STEP];

        while !self.stop_flag.load(Ordering::Relaxed) {
            for i in 0..STEP {
                let previous_index = if i == 0 { STEP - 1 } else { i - 1 };
                let previous = batch[previous_index];
                batch[i] = add_mixed(&previous, &offset_x, &offset_y);
            }

            for (index, point) in batch.iter().enumerate() {
                z_coords[index] = point.z;
            }
            if FieldElement::batch_invert_into(&z_coords, &mut inverses, &mut scratch).is_err() {
                warn!("batch inversion collapsed mid-batch, rekeying");
                match self.rekey() {
                    Some(scalar) => {
                        base_scalar = scalar;
                        batch[STEP - 1] = JacobianPoint::from_private(
                            &SafePrivateKey::from_bytes(&base_scalar).expect("reduced scalar"),
                        );
                        continue;
                    }
                    None => return,
                }
            }

            let mut hit_this_batch = false;
            for (index, point) in batch.iter().enumerate() {
                let (affine_x, affine_y) = match point.to_affine_bytes_with_inverse(&inverses[index]) {
                    Ok(pair) => pair,
                    Err(_) => continue,
                };

                let parity = if FieldElement::from_bytes_be(&affine_y).is_odd() { 0x03 } else { 0x02 };
                let mut compressed = [0u8; 33];
                compressed[0] = parity;
                compressed[1..].copy_from_slice(&affine_x);

                let hash = hash160(&compressed);
                self.counter.fetch_add(1, Ordering::Relaxed);
                if self.pattern_table.contains(&hash) {
                    let mut privkey_hit = base_scalar;
                    if add_u64_to_u256_be(&mut privkey_hit, (index + 1) as u64).is_err() {
                        continue;
                    }
                    let mut record = [0u8; 52];
                    record[..32].copy_from_slice(&privkey_hit);
                    record[32..].copy_from_slice(&hash);
                    if self.hit_sender.send(record).is_err() {
                        debug!("hit channel closed, worker exiting");
                        return;
                    }
                    // A hit ends this batch immediately; the loop below
                    // rekeys rather than continuing the addition chain.
                    hit_this_batch = true;
                    break;
                }
            }

            if self.stop_flag.load(Ordering::Relaxed) {
                return;
            }

            if hit_this_batch {
                match self.rekey() {
                    Some(scalar) => {
                        base_scalar = scalar;
                        batch[STEP - 1] = JacobianPoint::from_private(
                            &SafePrivateKey::from_bytes(&base_scalar).expect("reduced scalar"),
                        );
                    }
                    None => return,
                }
                continue;
            }

            if add_u64_to_u256_be(&mut base_scalar, STEP as u64).is_err() {
                info!("keyspace exhausted for this base scalar, rekeying");
                match self.rekey() {
                    Some(scalar) => {
                        base_scalar = scalar;
                        batch[STEP - 1] = JacobianPoint::from_private(
                            &SafePrivateKey::from_bytes(&base_scalar).expect("reduced scalar"),
                        );
                    }
                    None => return,
                }
            }
            // base[STEP - 1] already equals (new k)*G from the last
            // iteration of the inner add loop above; step 3 resumes
            // the chain from there next time around.
        }
    }

    /// Draws fresh 32 bytes of randomness, resampling while the
    /// top 64 bits are zero, until a nonzero-topped scalar is found.
    /// Returns `None` only if the stop flag was raised mid-draw.
    fn rekey(&self) -> Option<[u8; 32]> {
        loop {
            if self.stop_flag.load(Ordering::Relaxed) {
                return None;
            }
            let candidate = SafePrivateKey::new_random();
            let bytes = candidate.to_bytes();
            if bytes[0..8] != [0u8; 8] {
                return Some(bytes);
            }
        }
    }
}
