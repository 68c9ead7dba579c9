//! hepgen: a toy Monte Carlo generator for particle decay kinematics
//!
//!
//! # Introduction (for the physicist)
//!
//! This small computational library synthesizes events for a particle
//! decaying into N daughters at a single vertex: per event it samples proper
//! lifetimes, partitions the available momentum among the daughters while
//! exactly conserving energy and 3-momentum, derives the standard kinematic
//! observables (pt, theta, phi, eta, invariant mass, flight distance), and
//! accumulates everything into a columnar event tree.
//!
//! It is meant for quickly producing synthetic decay-kinematics datasets for
//! detector and algorithm prototyping. It is NOT a physically rigorous
//! phase-space generator: there is no matrix-element weighting and no proper
//! Dalitz-plot density, and the momentum budget deliberately mixes energy²
//! and momentum² without a relativistic correction.
//!
//!
//! # Introduction (for the numerical guy)
//!
//! Every event is an independent draw from the same sampling scheme, so the
//! program is an embarrassingly parallel Monte Carlo loop: events are
//! generated in batches, each batch on a private region of the random
//! stream, and per-batch partial trees are concatenated in batch order.
//!
//!
//! # Introduction (for the computer guy)
//!
//! The accompanying binary is a pipeline:
//!
//! * read in the run configuration and the decay/particle catalogs
//! * loop over (random) events, sampling lifetimes and momenta and deriving
//!   the per-particle observables
//! * fill everything into the event tree
//! * then display / store the result.

#![warn(missing_docs)]

pub mod config;
pub mod decay;
pub mod error;
pub mod evgen;
pub mod flight;
pub mod kinematics;
pub mod momentum;
pub mod numeric;
pub mod output;
pub mod particle;
pub mod partition;
pub mod random;
pub mod scheduling;
pub mod tree;
