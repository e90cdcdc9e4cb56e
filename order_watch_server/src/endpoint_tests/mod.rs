mod check;
mod helpers;
mod mocks;
