//! # roguepoker-engine: Heads-up Poker Roguelike Core
//!
//! Hand evaluation, betting and progression for a single-player poker run:
//! the player fights a ladder of opponents, one heads-up encounter per level,
//! until their chips run out or the final level is beaten. All randomness is
//! seeded so a run can be replayed.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and deck construction
//! - [`deck`] - Seeded deck shuffling with ChaCha20
//! - [`hand`] - Best-of-seven hand evaluation and comparison
//! - [`strength`] - Pre-flop and post-flop strength estimates
//! - [`rules`] - Action validation and antes
//! - [`betting`] - The per-street betting state machine
//! - [`game`] - State of the hand in progress
//! - [`policy`] - The opponent decision seam
//! - [`opponent`] - Enemy kinds, stats and special abilities
//! - [`items`] - Consumable items
//! - [`engine`] - Encounter and hand orchestration
//! - [`events`] - Events and snapshots for display
//! - [`logger`] - Hand history records in JSONL
//! - [`persistence`] - High-score save file
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use roguepoker_engine::cards::{Card, Rank, Suit};
//! use roguepoker_engine::hand::{evaluate_best, Category};
//!
//! let cards = [
//!     Card::new(Rank::Ace, Suit::Hearts),
//!     Card::new(Rank::King, Suit::Hearts),
//!     Card::new(Rank::Queen, Suit::Hearts),
//!     Card::new(Rank::Jack, Suit::Hearts),
//!     Card::new(Rank::Ten, Suit::Hearts),
//!     Card::new(Rank::Two, Suit::Clubs),
//!     Card::new(Rank::Three, Suit::Diamonds),
//! ];
//!
//! let best = evaluate_best(&cards).unwrap();
//! assert_eq!(best.category, Category::RoyalFlush);
//! ```
//!
//! ## Deterministic Gameplay
//!
//! ```rust
//! use roguepoker_engine::deck::Deck;
//!
//! let mut a = Deck::new_with_seed(42);
//! let mut b = Deck::new_with_seed(42);
//! a.shuffle();
//! b.shuffle();
//! assert_eq!(a.draw(5), b.draw(5));
//! ```

pub mod betting;
pub mod cards;
pub mod deck;
pub mod difficulty;
pub mod engine;
pub mod errors;
pub mod events;
pub mod game;
pub mod hand;
pub mod items;
pub mod logger;
pub mod opponent;
pub mod persistence;
pub mod player;
pub mod policy;
pub mod rules;
pub mod strength;
