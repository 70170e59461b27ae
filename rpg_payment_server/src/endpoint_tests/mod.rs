mod mocks;
mod payments;
