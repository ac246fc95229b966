/// What the genetic algorithm needs to know about an individual.
///
/// Both methods are called concurrently from rayon workers.
pub trait Evaluator: Send + Sync {
    fn is_valid(&self, individual: &[usize]) -> bool;

    /// Higher is better. Only called for individuals that passed `is_valid`.
    fn fitness(&self, individual: &[usize]) -> f64;
}

impl<E: Evaluator + ?Sized> Evaluator for &E {
    fn is_valid(&self, individual: &[usize]) -> bool {
        (**self).is_valid(individual)
    }

    fn fitness(&self, individual: &[usize]) -> f64 {
        (**self).fitness(individual)
    }
}

/// Adapts a pair of closures into an [`Evaluator`].
pub struct FnEvaluator<V, F> {
    validity: V,
    fitness: F,
}

impl<V, F> FnEvaluator<V, F>
where
    V: Fn(&[usize]) -> bool + Send + Sync,
    F: Fn(&[usize]) -> f64 + Send + Sync,
{
    pub fn new(validity: V, fitness: F) -> Self {
        Self { validity, fitness }
    }
}

impl<V, F> Evaluator for FnEvaluator<V, F>
where
    V: Fn(&[usize]) -> bool + Send + Sync,
    F: Fn(&[usize]) -> f64 + Send + Sync,
{
    fn is_valid(&self, individual: &[usize]) -> bool {
        (self.validity)(individual)
    }

    fn fitness(&self, individual: &[usize]) -> f64 {
        (self.fitness)(individual)
    }
}
