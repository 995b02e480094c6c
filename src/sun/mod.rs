pub mod decay;
pub mod illumination;
pub mod oracle;
pub mod subsolar;
pub mod terminator;
