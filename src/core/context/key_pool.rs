use addrbook_keys::KeyPair;
use std::collections::VecDeque;

/// Pre-generated keys handed out for new receiving addresses
#[derive(Debug, Default)]
pub struct KeyPool {
   keys: VecDeque<KeyPair>,
   target_size: usize,
}

impl KeyPool {
   pub fn new(target_size: usize) -> Self {
      Self {
         keys: VecDeque::with_capacity(target_size),
         target_size,
      }
   }

   pub fn len(&self) -> usize {
      self.keys.len()
   }

   pub fn is_empty(&self) -> bool {
      self.keys.is_empty()
   }

   pub fn target_size(&self) -> usize {
      self.target_size
   }

   /// How many keys are needed to get back to the target size
   pub fn missing(&self) -> usize {
      self.target_size.saturating_sub(self.keys.len())
   }

   /// Take the oldest key out of the pool
   pub fn reserve(&mut self) -> Option<KeyPair> {
      self.keys.pop_front()
   }

   pub fn extend(&mut self, keys: impl IntoIterator<Item = KeyPair>) {
      self.keys.extend(keys);
   }

   /// Generate keys until the pool is at its target size
   ///
   /// Returns the number of keys generated
   pub fn top_up(&mut self, version: u8) -> usize {
      let missing = self.missing();
      self.keys.extend((0..missing).map(|_| KeyPair::generate(version)));
      missing
   }
}

#[cfg(test)]
mod tests {
   use super::*;
   use addrbook_keys::DEFAULT_VERSION;

   #[test]
   fn top_up_and_reserve_in_order() {
      let mut pool = KeyPool::new(3);
      assert_eq!(pool.missing(), 3);
      assert_eq!(pool.top_up(DEFAULT_VERSION), 3);
      assert_eq!(pool.top_up(DEFAULT_VERSION), 0);

      let first = pool.keys[0].address().to_string();
      let reserved = pool.reserve().unwrap();
      assert_eq!(reserved.address(), first);
      assert_eq!(pool.len(), 2);
      assert_eq!(pool.missing(), 1);
   }

   #[test]
   fn empty_pool() {
      let mut pool = KeyPool::new(0);
      assert_eq!(pool.top_up(DEFAULT_VERSION), 0);
      assert!(pool.reserve().is_none());
   }
}
