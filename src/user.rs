//! # Frontend Flows
//!
//! Client logic/relevant structures.
//!
//! ## Overall Payloads
//!
//! JSON both ways. Errors always look like `{ "error": "..." }`.
//!
//! ### Delivery Check
//! To backend
//! - `{ input, layout }`, layout is `compact` or `full` and only changes presentation
//!
//! From backend
//! - `{ status, message, tone, layout }`
//! - status: `yes` | `no` (`maybe` is styled amber but never sent)
//! - 422 when the input is blank, the widget should never send one
//!
//! ### Auth
//! Headers
//! - Authorization: `Bearer <access_token>` on admin and checkout confirm calls
//!
//! Signup
//! - `{ email, password, access_password }`, the access password is shared out of band
//! - 201 `{ status: "confirm_email" }` or `{ status: "signed_in", session }`
//!
//! Magic link
//! - `{ email }`, 202, link lands on the home page
//!
//!
//!
//! ## Flow
//!
//! ### Delivery check widget
//! - Starts `idle`, submit disabled while the field is blank
//! - Submit (button or Enter) flips to `checking` and disables submit
//! - Response flips to `yes` or `no`
//! - Any edit to the field after that goes back to `idle` and clears the message
//!
//! ### Checkout
//! - Fetch `/api/checkout/options`, let the user pick a network then a token
//! - Ask for a quote, hand the returned request to the wallet untouched
//! - If the wallet is on another chain, ask it to switch before sending
//! - After submission, post the hash with the wallet's chain id to `/api/checkout/confirm`
//! - Show the pending order, no automatic retries on any failure
//!
//! ### Admin
//! - Testimonials start `pending`, admins approve or reject
//! - Orders list is read-only
