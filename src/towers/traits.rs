use crate::types::TowerReading;

/// Encode/decode between flat channel numbers and (eta, phi) bins.
pub trait ChannelMapping {
    fn decode(&self, channel: u32) -> Option<(usize, usize)>;
    fn encode(&self, eta: usize, phi: usize) -> Option<u32>;
}

/// Read access to a per-event collection of tower readings.
///
/// Implementors provide indexed iteration, a size query, and a way to locate
/// a channel on the (eta, phi) grid.
pub trait TowerSource {
    fn size(&self) -> usize;

    fn reading(&self, index: usize) -> Option<TowerReading>;

    /// Grid position of `channel`, or `None` when it falls outside the layer.
    fn locate(&self, channel: u32) -> Option<(usize, usize)>;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    fn readings(&self) -> Readings<'_, Self>
    where
        Self: Sized,
    {
        Readings {
            source: self,
            index: 0,
        }
    }
}

pub struct Readings<'a, S: ?Sized + TowerSource> {
    source: &'a S,
    index: usize,
}

impl<'a, S: TowerSource> Iterator for Readings<'a, S> {
    type Item = TowerReading;

    fn next(&mut self) -> Option<Self::Item> {
        while self.index < self.source.size() {
            let index = self.index;
            self.index += 1;
            if let Some(reading) = self.source.reading(index) {
                return Some(reading);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.source.size().saturating_sub(self.index)))
    }
}
