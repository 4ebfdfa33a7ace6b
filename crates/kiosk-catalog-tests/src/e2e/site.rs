//! The demo noticeboard, dispatched end to end: seven routes, all four
//! render strategies, and the seeded demo services behind them.
