pub mod scenario;
pub mod sim;
pub mod trace;

#[cfg(test)]
mod test;
